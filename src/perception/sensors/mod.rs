//! Sensor inputs handed to the core by the simulation engine
//!
//! Camera buffers are borrowed for the duration of a tick. Nothing here copies
//! pixel data.

use super::color::{ColorPalette, PixelClass, Rgb};
use crate::common::Pose2D;
use crate::error::{PusherError, Result};
use std::f32::consts::PI;

/// Cameras mounted around each robot
pub const CAMERA_COUNT: usize = 4;
/// Infrared range sensors mounted around each robot, 45 degrees apart
pub const INFRARED_COUNT: usize = 8;

const BYTES_PER_PIXEL: usize = 3;

/// One camera image in packed RGB row-major order
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame<'a> {
    pub width: usize,
    pub height: usize,
    pub pixels: &'a [u8],
    /// Negative until the engine renders the first image
    pub capture_time: f32,
}

impl<'a> CameraFrame<'a> {
    pub fn new(width: usize, height: usize, pixels: &'a [u8], capture_time: f32) -> Self {
        Self {
            width,
            height,
            pixels,
            capture_time,
        }
    }

    fn pixel(&self, x: usize, y: usize) -> Rgb {
        Rgb::from_packed(self.pixels, y * self.width + x)
    }
}

/// The four cameras of one robot, stitched into a 360 degree panorama
///
/// Camera 0 faces forward and the others follow counter-clockwise, so bearing
/// grows along the panoramic row and column `width / 2` looks straight ahead.
#[derive(Debug, Clone, Copy)]
pub struct CameraRing<'a> {
    frames: [CameraFrame<'a>; CAMERA_COUNT],
}

impl<'a> CameraRing<'a> {
    /// Validate and group four frames
    ///
    /// All frames must share dimensions and hold `width * height * 3` bytes.
    pub fn new(frames: &[CameraFrame<'a>]) -> Result<Self> {
        let frames: [CameraFrame<'a>; CAMERA_COUNT] = frames.try_into().map_err(|_| {
            PusherError::Sensor(format!(
                "expected {} camera frames, got {}",
                CAMERA_COUNT,
                frames.len()
            ))
        })?;

        let (width, height) = (frames[0].width, frames[0].height);
        if width == 0 || height == 0 {
            return Err(PusherError::Sensor("camera frame has zero size".to_string()));
        }

        for (i, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(PusherError::Sensor(format!(
                    "camera {} is {}x{}, camera 0 is {}x{}",
                    i, frame.width, frame.height, width, height
                )));
            }
            let expected = width * height * BYTES_PER_PIXEL;
            if frame.pixels.len() != expected {
                return Err(PusherError::Sensor(format!(
                    "camera {} buffer holds {} bytes, expected {}",
                    i,
                    frame.pixels.len(),
                    expected
                )));
            }
        }

        Ok(Self { frames })
    }

    /// Width of a single camera
    pub fn width(&self) -> usize {
        self.frames[0].width
    }

    pub fn height(&self) -> usize {
        self.frames[0].height
    }

    /// Length of a stitched panoramic row
    pub fn panorama_width(&self) -> usize {
        self.width() * CAMERA_COUNT
    }

    /// Capture time of the first camera, which keys frame freshness
    pub fn capture_time(&self) -> f32 {
        self.frames[0].capture_time
    }

    /// Color at column `x` of the panoramic row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let w = self.width();
        self.frames[x / w].pixel(x % w, y)
    }

    /// Classify panoramic row `y` into `out`, replacing its contents
    pub fn classify_row_into(&self, y: usize, palette: &ColorPalette, out: &mut Vec<PixelClass>) {
        out.clear();
        out.extend((0..self.panorama_width()).map(|x| palette.classify(self.pixel(x, y))));
    }
}

/// Eight infrared ranges. Index 0 looks forward and indices increase counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfraredRing {
    pub ranges: [f32; INFRARED_COUNT],
}

impl InfraredRing {
    pub fn new(ranges: [f32; INFRARED_COUNT]) -> Self {
        Self { ranges }
    }

    /// Every sensor reads `range`
    pub fn uniform(range: f32) -> Self {
        Self::new([range; INFRARED_COUNT])
    }

    /// Sensor index covering a body-frame bearing
    pub fn sector_index(bearing: f32) -> usize {
        let sectors = INFRARED_COUNT as f32;
        let idx = ((bearing + PI) / (2.0 * PI) * sectors - sectors / 2.0).round() as i32;
        idx.rem_euclid(INFRARED_COUNT as i32) as usize
    }

    /// Reading of the sensor that faces `bearing`
    pub fn range_toward(&self, bearing: f32) -> f32 {
        self.ranges[Self::sector_index(bearing)]
    }
}

/// Everything one robot senses in a tick
#[derive(Debug, Clone, Copy)]
pub struct RobotSensors<'a> {
    pub cameras: CameraRing<'a>,
    pub infrared: InfraredRing,
    pub pose: Pose2D,
}
