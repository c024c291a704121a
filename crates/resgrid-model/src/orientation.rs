//! Axis ordering and orientation of a grid.

use serde::{Deserialize, Serialize};

use crate::error::{GridValueError, Result};
use crate::token::match_token;

/// Whether coordinates along an axis are increasing or decreasing, the INC
/// and DEC tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Order {
    Increasing,
    Decreasing,
}

/// File token for an axis order.
pub fn order_token(order: Order) -> &'static str {
    match order {
        Order::Increasing => "INC",
        Order::Decreasing => "DEC",
    }
}

/// Parse an axis-order token.
pub fn order_from_token(token: &str) -> Result<Order> {
    if match_token(token, "INC") {
        Ok(Order::Increasing)
    } else if match_token(token, "DEC") {
        Ok(Order::Decreasing)
    } else {
        Err(GridValueError::InvalidEnumValue {
            expected: "axis order",
            token: token.to_string(),
        })
    }
}

/// Direction of the z axis, the UP and DOWN tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    Up,
    Down,
}

/// File token for a z direction.
pub fn orientation_token(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Up => "UP",
        Orientation::Down => "DOWN",
    }
}

/// Parse a z-direction token.
pub fn orientation_from_token(token: &str) -> Result<Orientation> {
    if match_token(token, "UP") {
        Ok(Orientation::Up)
    } else if match_token(token, "DOWN") {
        Ok(Orientation::Down)
    } else {
        Err(GridValueError::InvalidEnumValue {
            expected: "orientation",
            token: token.to_string(),
        })
    }
}

/// Handedness of the coordinate system, the LEFT and RIGHT tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Handedness {
    Left,
    Right,
}

/// File token for a handedness.
pub fn handedness_token(handedness: Handedness) -> &'static str {
    match handedness {
        Handedness::Left => "LEFT",
        Handedness::Right => "RIGHT",
    }
}

/// Parse a handedness token.
pub fn handedness_from_token(token: &str) -> Result<Handedness> {
    if match_token(token, "LEFT") {
        Ok(Handedness::Left)
    } else if match_token(token, "RIGHT") {
        Ok(Handedness::Right)
    } else {
        Err(GridValueError::InvalidEnumValue {
            expected: "handedness",
            token: token.to_string(),
        })
    }
}

/// The GDORIENT keyword: orientation of the grid.
///
/// The first three values give the coordinate order of the i, j and k axes,
/// then the direction of the z axis, then the handedness. The keyword
/// default is "INC INC INC DOWN RIGHT".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GdOrient {
    pub i_order: Order,
    pub j_order: Order,
    pub k_order: Order,
    pub z_direction: Orientation,
    pub handedness: Handedness,
}

impl Default for GdOrient {
    fn default() -> Self {
        Self {
            i_order: Order::Increasing,
            j_order: Order::Increasing,
            k_order: Order::Increasing,
            z_direction: Orientation::Down,
            handedness: Handedness::Right,
        }
    }
}

impl GdOrient {
    /// Decode a GDORIENT payload. Omitted trailing fields take the keyword
    /// defaults.
    pub fn from_values(values: &[String]) -> Result<Self> {
        let mut result = Self::default();
        if let Some(token) = values.first() {
            result.i_order = order_from_token(token)?;
        }
        if let Some(token) = values.get(1) {
            result.j_order = order_from_token(token)?;
        }
        if let Some(token) = values.get(2) {
            result.k_order = order_from_token(token)?;
        }
        if let Some(token) = values.get(3) {
            result.z_direction = orientation_from_token(token)?;
        }
        if let Some(token) = values.get(4) {
            result.handedness = handedness_from_token(token)?;
        }
        Ok(result)
    }

    /// Encode as a GDORIENT payload.
    pub fn to_values(&self) -> Vec<String> {
        vec![
            order_token(self.i_order).to_string(),
            order_token(self.j_order).to_string(),
            order_token(self.k_order).to_string(),
            orientation_token(self.z_direction).to_string(),
            handedness_token(self.handedness).to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_tables_roundtrip() {
        for order in [Order::Increasing, Order::Decreasing] {
            assert_eq!(order_from_token(order_token(order)).unwrap(), order);
        }
        for orientation in [Orientation::Up, Orientation::Down] {
            assert_eq!(
                orientation_from_token(orientation_token(orientation)).unwrap(),
                orientation
            );
        }
        for handedness in [Handedness::Left, Handedness::Right] {
            assert_eq!(
                handedness_from_token(handedness_token(handedness)).unwrap(),
                handedness
            );
        }
    }

    #[test]
    fn unknown_order_token_is_rejected() {
        assert!(matches!(
            order_from_token("SIDEWAYS"),
            Err(GridValueError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn gdorient_default_is_inc_inc_inc_down_right() {
        assert_eq!(
            GdOrient::default().to_values(),
            vec!["INC", "INC", "INC", "DOWN", "RIGHT"]
        );
    }

    #[test]
    fn gdorient_decodes_partial_payloads() {
        let orient = GdOrient::from_values(&["DEC".to_string()]).unwrap();
        assert_eq!(orient.i_order, Order::Decreasing);
        assert_eq!(orient.j_order, Order::Increasing);
        assert_eq!(orient.z_direction, Orientation::Down);
    }

    #[test]
    fn gdorient_roundtrips() {
        let orient = GdOrient {
            i_order: Order::Decreasing,
            j_order: Order::Increasing,
            k_order: Order::Decreasing,
            z_direction: Orientation::Up,
            handedness: Handedness::Left,
        };
        assert_eq!(GdOrient::from_values(&orient.to_values()).unwrap(), orient);
    }
}
