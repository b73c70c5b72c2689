//! Size hints and size policies.
//!
//! The components do not run a layout engine themselves; the hint tells the
//! host what size each widget prefers.

use nvs_render::Size;

/// How a widget behaves when the host allocates it more or less space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizePolicy {
    /// The widget always stays at its size hint.
    Fixed,
    /// The size hint is preferred but the widget can grow and shrink.
    #[default]
    Preferred,
    /// The widget wants as much space as possible.
    Expanding,
}

impl SizePolicy {
    /// Returns true if the policy allows the widget to grow.
    #[inline]
    pub fn can_grow(self) -> bool {
        !matches!(self, Self::Fixed)
    }

    /// Returns true if the widget actively wants more space.
    #[inline]
    pub fn wants_to_grow(self) -> bool {
        matches!(self, Self::Expanding)
    }
}

/// Size hint for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    /// The preferred size for the widget to display optimally.
    pub preferred: Size,

    /// The minimum acceptable size, if any.
    pub minimum: Option<Size>,

    /// The maximum size, if any.
    pub maximum: Option<Size>,
}

impl SizeHint {
    /// Create a new size hint with the specified preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a size hint with explicit width and height.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(Size::new(width, height))
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the maximum size.
    pub fn with_maximum(mut self, maximum: Size) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// The effective minimum (zero when unset).
    pub fn effective_minimum(&self) -> Size {
        self.minimum.unwrap_or(Size::ZERO)
    }

    /// Clamp a size to the hint's minimum and maximum.
    pub fn constrain(&self, size: Size) -> Size {
        let min = self.effective_minimum();
        let mut width = size.width.max(min.width);
        let mut height = size.height.max(min.height);
        if let Some(max) = self.maximum {
            width = width.min(max.width);
            height = height.min(max.height);
        }
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy() {
        assert!(!SizePolicy::Fixed.can_grow());
        assert!(SizePolicy::Preferred.can_grow());
        assert!(SizePolicy::Expanding.wants_to_grow());
        assert_eq!(SizePolicy::default(), SizePolicy::Preferred);
    }

    #[test]
    fn test_constrain() {
        let hint = SizeHint::from_dimensions(100.0, 30.0)
            .with_minimum(Size::new(40.0, 20.0))
            .with_maximum(Size::new(200.0, 40.0));

        assert_eq!(hint.constrain(Size::new(10.0, 10.0)), Size::new(40.0, 20.0));
        assert_eq!(hint.constrain(Size::new(500.0, 35.0)), Size::new(200.0, 35.0));
        assert_eq!(SizeHint::default().effective_minimum(), Size::ZERO);
    }
}
