use std::ops::RangeInclusive;

pub const FFT_EXPONENT_RANGE: RangeInclusive<i32> = 7..=13;
pub const ZOOM_EXPONENT_RANGE: RangeInclusive<i32> = 0..=10;
pub const POWER_RANGE_DB: RangeInclusive<i32> = -100..=20;

pub const DEFAULT_FFT_EXPONENT: i32 = 9;
pub const DEFAULT_ZOOM_EXPONENT: i32 = 0;
pub const DEFAULT_POWER_MAX_DB: i32 = 0;
pub const DEFAULT_POWER_MIN_DB: i32 = -50;

/// Clamps `value` into a control's declared range, the way a slider or spin
/// box does when it is handed an out-of-range value.
#[inline]
pub fn clamp_to_control(value: i32, range: &RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// The (FFT size, effective zoom) pair handed to the spectrogram engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSizes {
    pub fft_size: u32,
    pub zoom_size: u32,
}

/// Derives both sizes from the exponent pair. The zoom size is clamped so it
/// never exceeds the FFT size; the exponents themselves are left alone.
#[inline]
pub fn derive_sizes(fft_exponent: i32, zoom_exponent: i32) -> DerivedSizes {
    debug_assert!(
        FFT_EXPONENT_RANGE.contains(&fft_exponent),
        "fft exponent {fft_exponent} outside control range"
    );
    debug_assert!(
        ZOOM_EXPONENT_RANGE.contains(&zoom_exponent),
        "zoom exponent {zoom_exponent} outside control range"
    );
    let fft_size = 1u32 << fft_exponent;
    let raw_zoom = 1u32 << zoom_exponent;
    DerivedSizes {
        fft_size,
        zoom_size: fft_size.min(raw_zoom),
    }
}

/// Holds the two exponent controls and re-derives the size pair on every
/// change to either one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDeriver {
    fft_exponent: i32,
    zoom_exponent: i32,
}

impl Default for ParameterDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_FFT_EXPONENT, DEFAULT_ZOOM_EXPONENT)
    }
}

impl ParameterDeriver {
    pub const fn new(fft_exponent: i32, zoom_exponent: i32) -> Self {
        Self {
            fft_exponent,
            zoom_exponent,
        }
    }

    pub fn fft_exponent(&self) -> i32 {
        self.fft_exponent
    }

    pub fn zoom_exponent(&self) -> i32 {
        self.zoom_exponent
    }

    pub fn sizes(&self) -> DerivedSizes {
        derive_sizes(self.fft_exponent, self.zoom_exponent)
    }

    /// Always returns the freshly derived pair, even when nothing changed.
    pub fn set_fft_exponent(&mut self, exponent: i32) -> DerivedSizes {
        self.fft_exponent = exponent;
        self.sizes()
    }

    pub fn set_zoom_exponent(&mut self, exponent: i32) -> DerivedSizes {
        self.zoom_exponent = exponent;
        self.sizes()
    }

    /// Steps the zoom control up by one. Returns `None` when the control is
    /// already at its upper bound and therefore does not move.
    pub fn zoom_in(&mut self) -> Option<DerivedSizes> {
        self.step_zoom(1)
    }

    pub fn zoom_out(&mut self) -> Option<DerivedSizes> {
        self.step_zoom(-1)
    }

    fn step_zoom(&mut self, delta: i32) -> Option<DerivedSizes> {
        let next = clamp_to_control(self.zoom_exponent + delta, &ZOOM_EXPONENT_RANGE);
        (next != self.zoom_exponent).then(|| self.set_zoom_exponent(next))
    }
}

/// Display bounds in dB. Both ends move independently; `min` above `max` is
/// passed through as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRange {
    pub max: i32,
    pub min: i32,
}

impl Default for PowerRange {
    fn default() -> Self {
        Self {
            max: DEFAULT_POWER_MAX_DB,
            min: DEFAULT_POWER_MIN_DB,
        }
    }
}
