use nalgebra::Point2;

/// Pixel exclusion predicate used while matching curve pixels.
pub trait PixelMask {
    /// `true` when the pixel at `p` must be ignored.
    fn contains(&self, p: Point2<f32>) -> bool;
}

/// Mask that excludes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMask;

impl PixelMask for NoMask {
    #[inline]
    fn contains(&self, _p: Point2<f32>) -> bool {
        false
    }
}

impl<M: PixelMask + ?Sized> PixelMask for &M {
    #[inline]
    fn contains(&self, p: Point2<f32>) -> bool {
        (**self).contains(p)
    }
}
