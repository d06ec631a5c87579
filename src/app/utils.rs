// SPDX-License-Identifier: GPL-3.0-only

//! Parsing helpers for command-line arguments

/// Parse resolution string in format "WIDTHxHEIGHT"
///
/// Zero dimensions are rejected.
pub fn parse_resolution(resolution_str: &str) -> Result<(u32, u32), String> {
    let (width, height) = resolution_str
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", resolution_str))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;

    if width == 0 || height == 0 {
        return Err(format!("resolution must be non-zero, got {}x{}", width, height));
    }
    Ok((width, height))
}

/// Parse a point in format "X,Y"
pub fn parse_point(point_str: &str) -> Result<(f64, f64), String> {
    let (x, y) = point_str
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", point_str))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid x '{}'", x))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid y '{}'", y))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1440"), Ok((1920, 1440)));
        assert_eq!(parse_resolution("256x192"), Ok((256, 192)));
        assert!(parse_resolution("invalid").is_err());
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("0x192").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20"), Ok((10.0, 20.0)));
        assert_eq!(parse_point("0.5, 1.5"), Ok((0.5, 1.5)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }
}
