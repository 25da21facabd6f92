//! Explicit registry of coefficient tables by body
//!
//! Built once at startup by whatever loads the tables, then passed to the
//! code that needs models. The set of supported bodies is exactly the set
//! of registered tables, plus the Sun, which is always stationary.

use super::coefficients::CoefficientTable;
use super::model::{BodyModel, StationaryModel};
use super::vsop87::{SeriesEvaluator, SeriesLayout};
use super::Body;
use crate::{EphemerisError, Result};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CoefficientRegistry {
    tables: HashMap<Body, Arc<CoefficientTable>>,
}

impl CoefficientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` for `body`, replacing any earlier table
    ///
    /// The Sun cannot be given a table.
    pub fn register(&mut self, body: Body, table: CoefficientTable) -> Result<()> {
        if body == Body::Sun {
            return Err(EphemerisError::InvalidArgument(
                "the Sun is modelled as stationary and takes no coefficient table".to_string(),
            ));
        }
        log::debug!(
            "registering {} coefficient table with {} terms",
            body,
            table.term_count()
        );
        self.tables.insert(body, Arc::new(table));
        Ok(())
    }

    pub fn contains(&self, body: Body) -> bool {
        body == Body::Sun || self.tables.contains_key(&body)
    }

    /// Bodies with a registered table, in declaration order
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies: Vec<Body> = self.tables.keys().copied().collect();
        bodies.sort();
        bodies
    }

    /// Shared table for `body`
    pub fn table(&self, body: Body) -> Result<Arc<CoefficientTable>> {
        self.tables
            .get(&body)
            .cloned()
            .ok_or_else(|| EphemerisError::UnknownBody(body.to_string()))
    }

    /// Build a fresh model for `body`
    ///
    /// The Sun yields a [`StationaryModel`]; every other body needs a
    /// registered table or fails with [`EphemerisError::UnknownBody`].
    pub fn model(&self, body: Body, layout: SeriesLayout) -> Result<BodyModel> {
        if body == Body::Sun {
            return Ok(BodyModel::Stationary(StationaryModel::new(body, layout)));
        }
        let table = self.table(body)?;
        Ok(BodyModel::Series(SeriesEvaluator::new(body, table, layout)))
    }

    /// Same as [`CoefficientRegistry::model`], looking the body up by name
    pub fn model_by_name(&self, name: &str, layout: SeriesLayout) -> Result<BodyModel> {
        let body: Body = name.parse()?;
        self.model(body, layout)
    }
}
