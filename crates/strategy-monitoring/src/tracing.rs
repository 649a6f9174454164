use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::{
	fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
	pub level: Level,
	pub with_thread_ids: bool,
	pub with_file_and_line: bool,
	pub with_target: bool,
	pub with_span_events: FmtSpan,
	pub json_format: bool,
	/// Honour `RUST_LOG` when it is set
	pub respect_env_filter: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			level: Level::INFO,
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: true,
			with_span_events: FmtSpan::NONE,
			json_format: false,
			respect_env_filter: true,
		}
	}
}

impl TracingConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// Sets the level from a name such as `debug`; unknown names are an error.
	pub fn with_level_str(self, level: &str) -> Result<Self, String> {
		let level = Level::from_str(level.trim())
			.map_err(|_| format!("Invalid log level: {}", level))?;
		Ok(self.with_level(level))
	}

	pub fn with_json_format(mut self, json: bool) -> Self {
		self.json_format = json;
		self
	}

	pub fn debug() -> Self {
		Self {
			level: Level::DEBUG,
			with_thread_ids: true,
			with_file_and_line: true,
			with_span_events: FmtSpan::ENTER | FmtSpan::CLOSE,
			..Self::default()
		}
	}

	pub fn production() -> Self {
		Self {
			level: Level::INFO,
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: false,
			with_span_events: FmtSpan::NONE,
			json_format: true,
			respect_env_filter: false,
		}
	}

	fn env_filter(&self) -> EnvFilter {
		let fallback = || EnvFilter::new(self.level.as_str().to_ascii_lowercase());
		if self.respect_env_filter {
			EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
		} else {
			fallback()
		}
	}
}

/// Initialize tracing with the given configuration
pub fn init_tracing(config: TracingConfig) -> Result<(), Box<dyn std::error::Error>> {
	let subscriber = tracing_subscriber::registry().with(config.env_filter());

	if config.json_format {
		let json_layer = tracing_subscriber::fmt::layer()
			.json()
			.with_span_events(config.with_span_events.clone())
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(json_layer)
			.try_init()
			.map_err(|e| format!("Failed to initialize tracing: {}", e))?;
	} else {
		let fmt_layer = tracing_subscriber::fmt::layer()
			.with_span_events(config.with_span_events.clone())
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(fmt_layer)
			.try_init()
			.map_err(|e| format!("Failed to initialize tracing: {}", e))?;
	}

	info!("Tracing initialized with level: {:?}", config.level);
	Ok(())
}
