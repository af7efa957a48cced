//! Axis-aligned boxes in XYXY form, tagged with their coordinate space.

use std::fmt;
use std::marker::PhantomData;

/// Marker for absolute pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker for coordinates normalized to the unit square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Normalized {}

/// An axis-aligned bounding box (xmin, ymin, xmax, ymax).
///
/// `TSpace` is [`Pixel`] or [`Normalized`], so a pixel box cannot be compared
/// against a normalized one without an explicit [`BBoxXYXY::to_pixel`].
///
/// The constructor does not enforce ordering. Loaders check
/// [`BBoxXYXY::is_well_formed`] and drop boxes that fail it, so anything that
/// reaches the matcher has positive width and height.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a box from explicit corner coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            _space: PhantomData,
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Width of the box. Negative when the box is malformed.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the box. Negative when the box is malformed.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns true if all four coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.xmin.is_finite()
            && self.ymin.is_finite()
            && self.xmax.is_finite()
            && self.ymax.is_finite()
    }

    /// Returns true if the box has strictly positive width and height.
    ///
    /// NaN coordinates fail this check.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.xmax > self.xmin && self.ymax > self.ymin
    }

    /// Intersection-over-union with another box in the same space.
    ///
    /// Returns 0.0 as soon as the intersection is empty, without touching
    /// the areas. The result is symmetric and lies in `[0, 1]`.
    pub fn iou(&self, other: &Self) -> f64 {
        let inter_w = self.xmax.min(other.xmax) - self.xmin.max(other.xmin);
        let inter_h = self.ymax.min(other.ymax) - self.ymin.max(other.ymin);
        if !(inter_w > 0.0 && inter_h > 0.0) {
            return 0.0;
        }

        let inter = inter_w * inter_h;
        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            return 0.0;
        }

        (inter / union).min(1.0)
    }
}

impl BBoxXYXY<Normalized> {
    /// Builds a box from YOLO center/size values, without clipping.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::from_xyxy(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
    }

    /// Clips every edge into `[0, 1]`.
    ///
    /// A box that lies entirely outside the unit square comes back with
    /// non-positive width or height.
    pub fn clip_to_unit(&self) -> Self {
        Self::from_xyxy(
            self.xmin.max(0.0),
            self.ymin.max(0.0),
            self.xmax.min(1.0),
            self.ymax.min(1.0),
        )
    }

    /// Scales normalized coordinates into pixel space.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(
            self.xmin * image_width,
            self.ymin * image_height,
            self.xmax * image_width,
            self.ymax * image_height,
        )
    }
}

impl<TSpace> fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.xmin)
            .field("ymin", &self.ymin)
            .field("xmax", &self.xmax)
            .field("ymax", &self.ymax)
            .finish()
    }
}
