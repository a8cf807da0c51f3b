//! Report parameters
//!
//! Global directives for which rendered artifacts are written and how the
//! HTML and LaTeX index pages are laid out:
//! - Image format and frame/gauge/figure selection
//! - HTML index toggle and home link
//! - LaTeX wrapper toggle and layout density
//! - Storage format of the intermediate simulation output

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigError, ConfigResult};

/// Image format for printed figures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG raster image
    #[default]
    Png,
    /// JPEG raster image
    Jpg,
    /// PDF vector format
    Pdf,
    /// SVG scalable vector graphics
    Svg,
    /// EPS for LaTeX
    Eps,
}

impl ImageFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Svg => "svg",
            ImageFormat::Eps => "eps",
        }
    }
}

/// Strided range of frame indices, `start..stop` by `step`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSelection {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl Default for FrameSelection {
    fn default() -> Self {
        Self {
            start: 0,
            stop: 36,
            step: 4,
        }
    }
}

impl FrameSelection {
    pub fn new(start: usize, stop: usize, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// Selected frame numbers in increasing order
    pub fn frames(&self) -> impl Iterator<Item = usize> {
        // validate rejects a zero step; step_by would panic on it
        (self.start..self.stop).step_by(self.step.max(1))
    }

    pub fn contains(&self, frameno: usize) -> bool {
        self.step > 0
            && (self.start..self.stop).contains(&frameno)
            && (frameno - self.start) % self.step == 0
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        Ok(())
    }
}

/// Which gauges get their figures printed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeSelection {
    All,
    Explicit(BTreeSet<u32>),
}

impl Default for GaugeSelection {
    fn default() -> Self {
        GaugeSelection::Explicit([1, 2, 3].into_iter().collect())
    }
}

impl GaugeSelection {
    pub fn contains(&self, gauge: u32) -> bool {
        match self {
            GaugeSelection::All => true,
            GaugeSelection::Explicit(set) => set.contains(&gauge),
        }
    }
}

/// Which figures get printed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureSelection {
    #[default]
    All,
    Explicit(BTreeSet<u32>),
}

impl FigureSelection {
    pub fn contains(&self, figno: u32) -> bool {
        match self {
            FigureSelection::All => true,
            FigureSelection::Explicit(set) => set.contains(&figno),
        }
    }
}

/// Storage format of the simulation output being plotted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Ascii,
    Binary,
    Netcdf,
}

/// Export directives consumed by the rendering engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParameters {
    /// Write image files at all
    pub printfigs: bool,

    pub print_format: ImageFormat,

    pub frames: FrameSelection,

    pub gauges: GaugeSelection,

    pub figures: FigureSelection,

    /// Generate the HTML index pages
    pub html: bool,

    /// Link back from the HTML index
    pub html_homelink: Option<String>,

    /// Generate the LaTeX wrapper
    pub latex: bool,

    pub latex_figsperline: u32,

    pub latex_framesperline: u32,

    /// Run pdflatex on the wrapper
    pub latex_makepdf: bool,

    pub format: DataFormat,
}

impl Default for ReportParameters {
    fn default() -> Self {
        Self {
            printfigs: true,
            print_format: ImageFormat::Png,
            frames: FrameSelection::default(),
            gauges: GaugeSelection::default(),
            figures: FigureSelection::All,
            html: true,
            html_homelink: Some("../README.html".to_string()),
            latex: true,
            latex_figsperline: 2,
            latex_framesperline: 1,
            latex_makepdf: false,
            format: DataFormat::Ascii,
        }
    }
}

impl ReportParameters {
    /// Parse from TOML
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let params: Self = toml::from_str(toml_str)?;
        params.validate()?;
        Ok(params)
    }

    /// Parse from JSON
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        let params: Self = serde_json::from_str(json_str)?;
        params.validate()?;
        Ok(params)
    }

    /// Check internal consistency
    pub fn validate(&self) -> ConfigResult<()> {
        self.frames.validate()?;
        validation::validate_density("latex_figsperline", self.latex_figsperline)?;
        validation::validate_density("latex_framesperline", self.latex_framesperline)?;
        Ok(())
    }

    /// Whether a frame image for this figure is written
    pub fn prints_frame(&self, frameno: usize, figno: u32) -> bool {
        self.printfigs && self.frames.contains(frameno) && self.figures.contains(figno)
    }

    /// Whether a gauge image for this figure is written
    pub fn prints_gauge(&self, gauge: u32, figno: u32) -> bool {
        self.printfigs && self.gauges.contains(gauge) && self.figures.contains(figno)
    }

    /// `frame0004fig0.png`
    pub fn frame_image_name(&self, frameno: usize, figno: u32) -> String {
        format!("frame{:04}fig{}.{}", frameno, figno, self.print_format.extension())
    }

    /// `gauge0002fig300.png`
    pub fn gauge_image_name(&self, gauge: u32, figno: u32) -> String {
        format!("gauge{:04}fig{}.{}", gauge, figno, self.print_format.extension())
    }
}
