pub type Pixel = u32;
pub type Inch = f32;
pub type Dpi = f32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<P> {
    pub x: P,
    pub y: P,
}

impl<P> Point<P> {
    pub fn new(x: P, y: P) -> Self {
        Point { x, y }
    }
}

impl From<(f32, f32)> for Point<f32> {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

pub fn inches_from_pixel(pixel: &Pixel, dpi: &Dpi) -> Inch {
    (*pixel as Inch) / dpi
}

pub fn inch_point_from_pixel(point: &Point<Pixel>, dpi: &Dpi) -> Point<Inch> {
    (
        inches_from_pixel(&(point.x), dpi),
        inches_from_pixel(&(point.y), dpi),
    )
        .into()
}
