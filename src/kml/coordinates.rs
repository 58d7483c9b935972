//! KML `<coordinates>` text parsing.

use crate::models::Location;

/// Parse a KML coordinate string into locations.
///
/// Tokens are whitespace separated `lng,lat[,alt]` tuples. Tokens with fewer
/// than two fields or unparsable numbers are skipped. Note the axis swap: KML
/// lists longitude first, `Location` stores latitude first.
pub fn parse_coordinates(text: &str) -> Vec<Location> {
    text.split_whitespace().filter_map(parse_token).collect()
}

fn parse_token(token: &str) -> Option<Location> {
    let mut parts = token.split(',');
    let lng = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;
    Some(Location { lat, lng })
}
