//! Optional play-environment notes recorded alongside a result

/// Free-text environment fields; any of them may be empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvInfo {
    /// Room temperature (e.g. "24.5C")
    pub temperature: String,
    /// Humidity (e.g. "50%")
    pub humidity: String,
    pub weather: String,
    /// Time of day played (e.g. "morning")
    pub time_band: String,
    /// Anything else: hand condition, mouse pad, ...
    pub note: String,
}

impl EnvInfo {
    /// Whether at least one field was filled in
    pub fn has_any(&self) -> bool {
        self.fields().iter().any(|(_, value)| !value.is_empty())
    }

    /// Labeled fields in display order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Temperature", self.temperature.as_str()),
            ("Humidity", self.humidity.as_str()),
            ("Weather", self.weather.as_str()),
            ("Time band", self.time_band.as_str()),
            ("Note", self.note.as_str()),
        ]
    }
}
