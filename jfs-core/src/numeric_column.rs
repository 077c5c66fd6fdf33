use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Numeric incident columns offered for histograms and scatter plots.
///
/// String names match the headers of the BASE Fatality List export.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize)]
pub enum NumericColumn {
    #[serde(rename = "skydives")]
    Skydives,
    #[serde(rename = "WS_skydives")]
    WsSkydives,
    #[serde(rename = "base_jumps")]
    BaseJumps,
    #[serde(rename = "WS_base_jumps")]
    WsBaseJumps,
    #[serde(rename = "base_seasons")]
    BaseSeasons,
    #[serde(rename = "age")]
    Age,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::Skydives,
        NumericColumn::WsSkydives,
        NumericColumn::BaseJumps,
        NumericColumn::WsBaseJumps,
        NumericColumn::BaseSeasons,
        NumericColumn::Age,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericColumn::Skydives => "skydives",
            NumericColumn::WsSkydives => "WS_skydives",
            NumericColumn::BaseJumps => "base_jumps",
            NumericColumn::WsBaseJumps => "WS_base_jumps",
            NumericColumn::BaseSeasons => "base_seasons",
            NumericColumn::Age => "age",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericColumn::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = NumericColumn::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown numeric column {:?} (expected one of {})", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for column in NumericColumn::ALL {
            assert_eq!(column.as_str().parse::<NumericColumn>(), Ok(column));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ws_base_jumps".parse::<NumericColumn>(), Ok(NumericColumn::WsBaseJumps));
        assert!("height".parse::<NumericColumn>().is_err());
    }
}
