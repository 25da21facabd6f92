//! Sidereal Time Tool
//!
//! Prints the Julian day, Greenwich mean sidereal time and, when a longitude
//! is given, the local mean sidereal and solar times for a UTC instant.
//!
//! Usage:
//!   cargo run --bin sidereal_time -- [--longitude DEG] ["2016.01.22 13:03:01" ...]

use clap::{ArgAction, Parser};
use ephemeris::coordinates::Angle;
use ephemeris::framelib::mean_obliquity;
use ephemeris::time::{Time, Timescale};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sidereal Time Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes Julian day and mean sidereal time for a UTC instant",
    long_about = None
)]
struct Args {
    /// Geographic longitude in degrees, east positive
    #[arg(short, long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Use the Julian calendar for day numbers below this JDN
    #[arg(long)]
    julian_before: Option<i64>,

    /// Also print the mean obliquity of the ecliptic
    #[arg(short, long, action = ArgAction::SetTrue)]
    obliquity: bool,

    /// UTC dates as "yyyy.MM.dd HH:mm:ss" or "dd/MM/yyyy HH"; defaults to now
    dates: Vec<String>,
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<24}{}", format!("{}:", name), value);
}

/// Prints the time quantities for one instant
fn display_time(time: &Time, longitude: Option<Angle>, obliquity: bool) {
    print_named_value("UTC", time);
    print_named_value("Julian day", format!("{:.6}", time.julian_day()));
    print_named_value(
        "TDT days since J2000",
        format!("{:.6}", time.terrestrial_dynamical_time()),
    );
    let gmst = time.mean_sidereal_angle();
    print_named_value(
        "GMST",
        format!("{} ({:.6} h)", gmst.sexagesimal(), gmst.to_hours()),
    );

    if let Some(longitude) = longitude {
        let lst = time.local_mean_sidereal_time(longitude);
        let solar = time.mean_solar_time(longitude);
        print_named_value("Longitude", longitude.sexagesimal());
        print_named_value(
            "Local sidereal time",
            format!("{} ({:.6} h)", lst.sexagesimal(), lst.to_hours()),
        );
        print_named_value("Mean solar time", solar.sexagesimal());
    }

    if obliquity {
        let eps = mean_obliquity(time);
        print_named_value(
            "Mean obliquity",
            format!("{} ({:.6}°)", eps.sexagesimal(), eps.to_degrees()),
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let longitude = match args.longitude {
        Some(degrees) if !degrees.is_finite() => {
            return Err(format!("longitude {} is not finite", degrees).into())
        }
        Some(degrees) => Some(Angle::from_degrees(degrees)),
        None => None,
    };

    let timescale = Timescale::new(args.julian_before);
    let times = if args.dates.is_empty() {
        vec![Time::now()]
    } else {
        args.dates
            .iter()
            .map(|date| timescale.parse(date))
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    for (i, time) in times.iter().enumerate() {
        if i > 0 {
            println!("-------------------------------------------------------");
        }
        display_time(time, longitude, args.obliquity);
    }

    Ok(())
}
