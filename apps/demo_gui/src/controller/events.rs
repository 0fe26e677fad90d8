//! Events the screen controller consumes from the host UI runtime.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Width strictly greater than height counts as landscape; square
    /// surfaces stay portrait.
    pub fn of(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn is_portrait(self) -> bool {
        matches!(self, Orientation::Portrait)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The segmented switch reported a newly selected index.
    SegmentSelected { index: usize },
    /// The back button's primary action fired. No payload.
    BackActivated,
    /// The display surface transitioned between portrait and landscape.
    OrientationChanged { orientation: Orientation },
}

#[cfg(test)]
mod tests {
    use super::Orientation;

    #[test]
    fn wider_than_tall_is_landscape() {
        assert_eq!(Orientation::of(800.0, 400.0), Orientation::Landscape);
        assert_eq!(Orientation::of(400.0, 800.0), Orientation::Portrait);
    }

    #[test]
    fn square_surface_counts_as_portrait() {
        assert!(Orientation::of(600.0, 600.0).is_portrait());
    }
}
