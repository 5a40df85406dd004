//! Diagram configuration with YAML schema and validation.
//!
//! Mistake-proofing happens in three layers: type-safe structs,
//! schema validation via serde, and runtime semantic validation for
//! the constraints serde cannot express (axis ordering, dated records
//! without a calendar).
//!
//! Every orbit record is positioned by exactly one of `ls` (degrees of
//! solar longitude) or `date` (resolved through the configured season
//! calendar). [`DiagramConfig::titan`] is the complete Titan figure:
//! decade marks, the Voyager and Huygens flybys and the Cassini tour,
//! all dated, resolved against the fitted Titan calendar.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{OrreryError, OrreryResult};
use crate::geometry::ellipse::OrbitEllipse;
use crate::geometry::solar::{LegendEntry, SunAnchor, DEFAULT_BAND_THICKNESS};
use crate::scene::{
    MoonFigure, SeasonsDiagram, SpanMark, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_SUN_RADIUS,
};
use crate::seasons::{preset_date, SeasonCalendar};

/// Top-level diagram configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DiagramConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Diagram metadata.
    #[serde(default)]
    pub diagram: DiagramMeta,

    /// Orbit shape.
    #[validate(nested)]
    pub orbit: OrbitConfig,

    /// Canvas size.
    #[validate(nested)]
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Sun disc.
    #[validate(nested)]
    #[serde(default)]
    pub sun: SunConfig,

    /// Season calendar resolving dated records.
    #[serde(default)]
    pub calendar: CalendarPreset,

    /// Draw the inner solar-longitude scale.
    #[serde(default = "default_true")]
    pub inner_ticks: bool,

    /// Moon figure.
    #[validate(nested)]
    #[serde(default)]
    pub moon: Option<MoonConfig>,

    /// Year boundary markers.
    #[serde(default)]
    pub year_marks: Vec<YearMarkConfig>,

    /// Flyby slivers.
    #[validate(nested)]
    #[serde(default)]
    pub flybys: Vec<FlybyConfig>,

    /// Mission span bands.
    #[validate(nested)]
    #[serde(default)]
    pub spans: Vec<SpanConfig>,

    /// Legend entries.
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_true() -> bool {
    true
}

impl DiagramConfig {
    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the YAML does not
    /// match the schema, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> OrreryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> OrreryResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> OrreryResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> DiagramConfigBuilder {
        DiagramConfigBuilder::default()
    }

    /// The Titan seasonal diagram.
    ///
    /// Orbit shape and rotation follow the fitted Titan orbit
    /// (eccentricity 0.0558, perihelion near Ls 280), with the real
    /// Voyager, Huygens and Cassini dates resolved through the
    /// calendar at assembly time.
    #[must_use]
    pub fn titan() -> Self {
        let year_marks = (1980..=2030)
            .step_by(10)
            .map(|year| YearMarkConfig {
                position: OrbitPositionSpec::on_date(preset_date(year, 1, 1)),
                label: None,
            })
            .collect();
        let flyby = |name: &str, color: &str, date: NaiveDate| FlybyConfig {
            name: name.to_string(),
            color: color.to_string(),
            position: OrbitPositionSpec::on_date(date),
        };
        let season_label = |ls: f64, text: &str| LegendEntry {
            ls,
            radius_fraction: 0.5,
            text: text.to_string(),
            rotation_deg: None,
            font_size: None,
        };
        Self {
            schema_version: default_schema_version(),
            diagram: DiagramMeta {
                name: "Titan seasons".to_string(),
                description: "Saturn-system seasons with Voyager, Huygens and Cassini coverage"
                    .to_string(),
            },
            orbit: OrbitConfig {
                semi_major: 200.0,
                semi_minor: 199.7,
                rotation_deg: -10.1,
                eccentricity: 0.0558,
            },
            canvas: CanvasConfig::default(),
            sun: SunConfig::default(),
            calendar: CalendarPreset::Titan,
            inner_ticks: true,
            moon: Some(MoonConfig {
                name: "Titan".to_string(),
                radius: 15.0,
                obliquity_deg: 26.73,
                color: "gold".to_string(),
                position: OrbitPositionSpec::on_date(preset_date(2025, 4, 24)),
            }),
            year_marks,
            flybys: vec![
                flyby("Voyager 1", "red", preset_date(1980, 11, 12)),
                flyby("Voyager 2", "green", preset_date(1981, 8, 25)),
                flyby("Huygens", "orange", preset_date(2005, 1, 14)),
            ],
            spans: vec![SpanConfig {
                name: "Cassini".to_string(),
                color: "skyblue".to_string(),
                start: OrbitPositionSpec::on_date(preset_date(2004, 7, 1)),
                end: OrbitPositionSpec::on_date(preset_date(2017, 9, 15)),
                thickness: default_band_thickness(),
            }],
            legend: vec![
                season_label(45.0, "northern spring"),
                season_label(135.0, "northern summer"),
                season_label(225.0, "northern autumn"),
                season_label(315.0, "northern winter"),
            ],
        }
    }

    /// The configured season calendar, if any.
    #[must_use]
    pub fn season_calendar(&self) -> Option<SeasonCalendar> {
        self.calendar.build()
    }

    /// Build the scene assembler for this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for ambiguous or empty positions, dated
    /// records without a calendar, or dates the calendar cannot place.
    pub fn to_diagram(&self) -> OrreryResult<SeasonsDiagram> {
        let calendar = self.calendar.build();
        let resolve = |spec: &OrbitPositionSpec, owner: &str| -> OrreryResult<f64> {
            match spec.kind(owner)? {
                OrbitPosition::Ls(ls) => Ok(ls),
                OrbitPosition::Date(date) => calendar
                    .as_ref()
                    .ok_or_else(|| {
                        OrreryError::config(format!(
                            "{owner} is dated {date} but no calendar is configured"
                        ))
                    })?
                    .ls_of_date(date),
            }
        };

        let ellipse = OrbitEllipse::new(
            self.orbit.semi_major,
            self.orbit.semi_minor,
            self.orbit.rotation_deg,
        );
        let mut diagram = SeasonsDiagram::new(SunAnchor::new(ellipse, self.orbit.eccentricity))
            .with_canvas(self.canvas.width, self.canvas.height)
            .with_sun_disc(self.sun.radius, &self.sun.color);
        if self.inner_ticks {
            diagram = diagram.with_inner_ticks();
        }
        for (index, mark) in self.year_marks.iter().enumerate() {
            let owner = format!("year mark {}", index + 1);
            diagram = diagram.add_year_mark(
                resolve(&mark.position, &owner)?,
                &mark.resolved_label(&owner)?,
            );
        }
        for flyby in &self.flybys {
            let owner = format!("flyby '{}'", flyby.name);
            diagram = diagram.add_flyby(
                resolve(&flyby.position, &owner)?,
                &flyby.name,
                &flyby.color,
            );
        }
        for span in &self.spans {
            diagram = diagram.add_span(SpanMark {
                start_ls: resolve(&span.start, &format!("span '{}' start", span.name))?,
                end_ls: resolve(&span.end, &format!("span '{}' end", span.name))?,
                name: span.name.clone(),
                color: span.color.clone(),
                thickness: span.thickness,
            });
        }
        for entry in &self.legend {
            diagram = diagram.add_legend(entry.clone());
        }
        if let Some(moon) = &self.moon {
            let owner = format!("moon '{}'", moon.name);
            diagram = diagram.with_moon(
                MoonFigure::new(&moon.name, moon.radius, moon.obliquity_deg, &moon.color),
                resolve(&moon.position, &owner)?,
            );
        }
        Ok(diagram)
    }

    /// Validate semantic constraints beyond the schema.
    fn validate_semantic(&self) -> OrreryResult<()> {
        if self.orbit.semi_minor > self.orbit.semi_major {
            return Err(OrreryError::config(format!(
                "semi-minor axis {} exceeds the semi-major axis {}",
                self.orbit.semi_minor, self.orbit.semi_major
            )));
        }
        let has_calendar = !matches!(self.calendar, CalendarPreset::None);
        for (spec, owner) in self.positions() {
            let kind = spec.kind(&owner)?;
            if matches!(kind, OrbitPosition::Date(_)) && !has_calendar {
                return Err(OrreryError::config(format!(
                    "{owner} is dated but no calendar is configured"
                )));
            }
        }
        for (index, mark) in self.year_marks.iter().enumerate() {
            mark.resolved_label(&format!("year mark {}", index + 1))?;
        }
        Ok(())
    }

    fn positions(&self) -> Vec<(OrbitPositionSpec, String)> {
        let mut all = Vec::new();
        if let Some(moon) = &self.moon {
            all.push((moon.position, format!("moon '{}'", moon.name)));
        }
        for (index, mark) in self.year_marks.iter().enumerate() {
            all.push((mark.position, format!("year mark {}", index + 1)));
        }
        for flyby in &self.flybys {
            all.push((flyby.position, format!("flyby '{}'", flyby.name)));
        }
        for span in &self.spans {
            all.push((span.start, format!("span '{}' start", span.name)));
            all.push((span.end, format!("span '{}' end", span.name)));
        }
        all
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct DiagramConfigBuilder {
    name: Option<String>,
    orbit: Option<OrbitConfig>,
    calendar: Option<CalendarPreset>,
    inner_ticks: Option<bool>,
}

impl DiagramConfigBuilder {
    /// Set the diagram name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the orbit shape.
    #[must_use]
    pub const fn orbit(
        mut self,
        semi_major: f64,
        semi_minor: f64,
        rotation_deg: f64,
        eccentricity: f64,
    ) -> Self {
        self.orbit = Some(OrbitConfig {
            semi_major,
            semi_minor,
            rotation_deg,
            eccentricity,
        });
        self
    }

    /// Set the season calendar.
    #[must_use]
    pub const fn calendar(mut self, preset: CalendarPreset) -> Self {
        self.calendar = Some(preset);
        self
    }

    /// Toggle the inner solar-longitude scale.
    #[must_use]
    pub const fn inner_ticks(mut self, enabled: bool) -> Self {
        self.inner_ticks = Some(enabled);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the orbit is missing or any constraint
    /// fails.
    pub fn build(self) -> OrreryResult<DiagramConfig> {
        let orbit = self
            .orbit
            .ok_or_else(|| OrreryError::config("an orbit shape is required"))?;
        let config = DiagramConfig {
            schema_version: default_schema_version(),
            diagram: DiagramMeta {
                name: self.name.unwrap_or_default(),
                description: String::new(),
            },
            orbit,
            canvas: CanvasConfig::default(),
            sun: SunConfig::default(),
            calendar: self.calendar.unwrap_or_default(),
            inner_ticks: self.inner_ticks.unwrap_or(true),
            moon: None,
            year_marks: Vec::new(),
            flybys: Vec::new(),
            spans: Vec::new(),
            legend: Vec::new(),
        };
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// Diagram metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramMeta {
    /// Diagram name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Orbit shape configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrbitConfig {
    /// Semi-major axis, canvas units.
    #[validate(range(min = 1.0))]
    pub semi_major: f64,
    /// Semi-minor axis, canvas units.
    #[validate(range(min = 1.0))]
    pub semi_minor: f64,
    /// Major-axis rotation, degrees clockwise on screen.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Orbital eccentricity placing the sun off center.
    #[validate(range(min = 0.0, max = 0.99))]
    #[serde(default)]
    pub eccentricity: f64,
}

/// Canvas size configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct CanvasConfig {
    /// Width in pixels.
    #[validate(range(min = 100.0))]
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    /// Height in pixels.
    #[validate(range(min = 100.0))]
    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

const fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

const fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Sun disc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SunConfig {
    /// Disc radius, canvas units.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_sun_radius")]
    pub radius: f64,
    /// Disc color.
    #[serde(default = "default_sun_color")]
    pub color: String,
}

const fn default_sun_radius() -> f64 {
    DEFAULT_SUN_RADIUS
}

fn default_sun_color() -> String {
    "yellow".to_string()
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: default_sun_radius(),
            color: default_sun_color(),
        }
    }
}

/// Season calendar preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarPreset {
    /// No calendar; dated records are rejected.
    #[default]
    None,
    /// The fitted Titan calendar.
    Titan,
}

impl CalendarPreset {
    /// Instantiate the preset.
    #[must_use]
    pub fn build(self) -> Option<SeasonCalendar> {
        match self {
            Self::None => None,
            Self::Titan => Some(SeasonCalendar::titan()),
        }
    }
}

/// A classified record position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitPosition {
    /// Solar longitude, degrees.
    Ls(f64),
    /// Calendar date.
    Date(NaiveDate),
}

/// Position fields shared by every orbit record.
///
/// Exactly one of `ls` and `date` must be set; the pair flattens into
/// each record so the YAML stays one level deep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitPositionSpec {
    /// Solar longitude, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ls: Option<f64>,
    /// Calendar date, resolved through the season calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl OrbitPositionSpec {
    /// A longitude position.
    #[must_use]
    pub const fn at_ls(ls: f64) -> Self {
        Self {
            ls: Some(ls),
            date: None,
        }
    }

    /// A dated position.
    #[must_use]
    pub const fn on_date(date: NaiveDate) -> Self {
        Self {
            ls: None,
            date: Some(date),
        }
    }

    /// Classify this position, rejecting ambiguous and empty ones.
    ///
    /// # Errors
    ///
    /// Configuration errors naming `owner` when both or neither field
    /// is set.
    pub fn kind(&self, owner: &str) -> OrreryResult<OrbitPosition> {
        match (self.ls, self.date) {
            (Some(ls), None) => Ok(OrbitPosition::Ls(ls)),
            (None, Some(date)) => Ok(OrbitPosition::Date(date)),
            (Some(_), Some(_)) => Err(OrreryError::config(format!(
                "{owner} has both ls and date; pick one"
            ))),
            (None, None) => Err(OrreryError::config(format!("{owner} needs an ls or a date"))),
        }
    }
}

/// Moon figure configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MoonConfig {
    /// Name, also the SVG group id.
    #[validate(length(min = 1))]
    #[serde(default = "default_moon_name")]
    pub name: String,
    /// Disc radius, canvas units.
    #[validate(range(min = 0.5))]
    #[serde(default = "default_moon_radius")]
    pub radius: f64,
    /// Axial tilt, degrees.
    #[serde(default)]
    pub obliquity_deg: f64,
    /// Disc color.
    #[serde(default = "default_moon_color")]
    pub color: String,
    /// Position on the orbit.
    #[serde(flatten)]
    pub position: OrbitPositionSpec,
}

fn default_moon_name() -> String {
    "planet".to_string()
}

const fn default_moon_radius() -> f64 {
    15.0
}

fn default_moon_color() -> String {
    "blue".to_string()
}

/// A year boundary marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMarkConfig {
    /// Position; a dated mark labels itself with the year.
    #[serde(flatten)]
    pub position: OrbitPositionSpec,
    /// Label override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl YearMarkConfig {
    fn resolved_label(&self, owner: &str) -> OrreryResult<String> {
        if let Some(label) = &self.label {
            return Ok(label.clone());
        }
        match self.position.kind(owner)? {
            OrbitPosition::Date(date) => Ok(date.year().to_string()),
            OrbitPosition::Ls(_) => Err(OrreryError::config(format!(
                "{owner} is positioned by ls and needs an explicit label"
            ))),
        }
    }
}

/// A flyby sliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FlybyConfig {
    /// Mission or event name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Band color.
    #[serde(default = "default_band_color")]
    pub color: String,
    /// Position on the orbit.
    #[serde(flatten)]
    pub position: OrbitPositionSpec,
}

fn default_band_color() -> String {
    "gray".to_string()
}

/// A mission span band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SpanConfig {
    /// Mission name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Band color.
    #[serde(default = "default_band_color")]
    pub color: String,
    /// Span start.
    pub start: OrbitPositionSpec,
    /// Span end.
    pub end: OrbitPositionSpec,
    /// Radial depth of the band.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_band_thickness")]
    pub thickness: f64,
}

const fn default_band_thickness() -> f64 {
    DEFAULT_BAND_THICKNESS
}
