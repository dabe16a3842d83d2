use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub webdriver: WebDriverSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Firefox,
    Chrome,
}

#[derive(Deserialize, Clone)]
pub struct WebDriverSettings {
    /// geckodriver / chromedriver endpoint, e.g. http://localhost:4444
    pub server_url: String,
    pub browser: Browser,
    pub headless: bool,
}

#[derive(Deserialize, Clone)]
pub struct ScraperSettings {
    pub search_endpoint: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_scroll: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_step_pixels: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_settle_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub render_settle_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub listing_wait_millis: u64,
    /// Page sources of finished runs are written here when set.
    pub snapshot_dir: Option<String>,
}

impl ScraperSettings {
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_millis)
    }

    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_millis)
    }

    pub fn listing_wait(&self) -> Duration {
        Duration::from_millis(self.listing_wait_millis)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_SCRAPER__MAX_SCROLL=5 sets scraper.max_scroll
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_from_string() {
        assert!(matches!(
            Environment::try_from("Production".to_string()),
            Ok(Environment::Production)
        ));
        assert!(matches!(
            Environment::try_from("local".to_string()),
            Ok(Environment::Local)
        ));
        assert!(Environment::try_from("staging".to_string()).is_err());
    }

    #[test]
    fn scraper_settings_from_strings() {
        let settings = config::Config::builder()
            .set_override("search_endpoint", "https://www.google.com/search")
            .unwrap()
            .set_override("max_scroll", "5")
            .unwrap()
            .set_override("scroll_step_pixels", "5000")
            .unwrap()
            .set_override("scroll_settle_millis", "2000")
            .unwrap()
            .set_override("render_settle_millis", "7000")
            .unwrap()
            .set_override("listing_wait_millis", "30000")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<ScraperSettings>()
            .unwrap();

        assert_eq!(settings.max_scroll, 5);
        assert_eq!(settings.scroll_settle(), Duration::from_secs(2));
        assert_eq!(settings.render_settle(), Duration::from_secs(7));
        assert_eq!(settings.listing_wait(), Duration::from_secs(30));
        assert!(settings.snapshot_dir.is_none());
    }

    #[test]
    fn browser_names_are_lowercase() {
        let browser: Browser = serde_json::from_str("\"chrome\"").unwrap();
        assert_eq!(browser, Browser::Chrome);
        assert!(serde_json::from_str::<Browser>("\"safari\"").is_err());
    }
}
