use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of measurement units a dataset can be tagged with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Meters,
    Kilometers,
    Miles,
    Grams,
    Kilograms,
    Pounds,
    Celsius,
    Fahrenheit,
    Percentage,
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    Dollars,
    Euros,
    Rupees,
    Count,
}

impl Unit {
    pub const ALL: [Unit; 25] = [
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
        Unit::Days,
        Unit::Weeks,
        Unit::Months,
        Unit::Years,
        Unit::Meters,
        Unit::Kilometers,
        Unit::Miles,
        Unit::Grams,
        Unit::Kilograms,
        Unit::Pounds,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Percentage,
        Unit::Bytes,
        Unit::Kilobytes,
        Unit::Megabytes,
        Unit::Gigabytes,
        Unit::Terabytes,
        Unit::Dollars,
        Unit::Euros,
        Unit::Rupees,
        Unit::Count,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Months => "months",
            Unit::Years => "years",
            Unit::Meters => "meters",
            Unit::Kilometers => "kilometers",
            Unit::Miles => "miles",
            Unit::Grams => "grams",
            Unit::Kilograms => "kilograms",
            Unit::Pounds => "pounds",
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
            Unit::Percentage => "percentage",
            Unit::Bytes => "bytes",
            Unit::Kilobytes => "kilobytes",
            Unit::Megabytes => "megabytes",
            Unit::Gigabytes => "gigabytes",
            Unit::Terabytes => "terabytes",
            Unit::Dollars => "dollars",
            Unit::Euros => "euros",
            Unit::Rupees => "rupees",
            Unit::Count => "count",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == value)
            .ok_or_else(|| format!("Unknown unit: {value}"))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_unit() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()).unwrap(), unit);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(Unit::parse("lightyears").is_err());
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Unit::Kilometers).unwrap();
        assert_eq!(json, "\"kilometers\"");
        let unit: Unit = serde_json::from_str("\"count\"").unwrap();
        assert_eq!(unit, Unit::Count);
    }
}
