use serde::{Deserialize, Serialize};

/// Sixteen-point compass rose, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CardinalDirection {
    const ORDERED: [CardinalDirection; 16] = [
        CardinalDirection::N,
        CardinalDirection::NNE,
        CardinalDirection::NE,
        CardinalDirection::ENE,
        CardinalDirection::E,
        CardinalDirection::ESE,
        CardinalDirection::SE,
        CardinalDirection::SSE,
        CardinalDirection::S,
        CardinalDirection::SSW,
        CardinalDirection::SW,
        CardinalDirection::WSW,
        CardinalDirection::W,
        CardinalDirection::WNW,
        CardinalDirection::NW,
        CardinalDirection::NNW,
    ];

    /// Each sector spans 22.5 degrees centred on its label.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let sector = (bearing_deg / 22.5).round() as i64;
        Self::ORDERED[sector.rem_euclid(16) as usize]
    }

    pub const fn label(self) -> &'static str {
        match self {
            CardinalDirection::N => "N",
            CardinalDirection::NNE => "NNE",
            CardinalDirection::NE => "NE",
            CardinalDirection::ENE => "ENE",
            CardinalDirection::E => "E",
            CardinalDirection::ESE => "ESE",
            CardinalDirection::SE => "SE",
            CardinalDirection::SSE => "SSE",
            CardinalDirection::S => "S",
            CardinalDirection::SSW => "SSW",
            CardinalDirection::SW => "SW",
            CardinalDirection::WSW => "WSW",
            CardinalDirection::W => "W",
            CardinalDirection::WNW => "WNW",
            CardinalDirection::NW => "NW",
            CardinalDirection::NNW => "NNW",
        }
    }
}

impl std::fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn cardinal_direction(bearing_deg: f64) -> CardinalDirection {
    CardinalDirection::from_bearing(bearing_deg)
}
