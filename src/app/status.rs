use crate::ui::style as ui;
use bandcoach::config::{Config, CredentialSource};

pub fn render_status(config: &Config) -> String {
    let credential = match config.credential() {
        Some((credential, CredentialSource::Env(var))) => {
            format!("{} (from ${var})", ui::value(credential.masked()))
        }
        Some((credential, CredentialSource::ConfigFile)) => format!(
            "{} ({})",
            ui::value(credential.masked()),
            if config.secrets.encrypt {
                "stored encrypted"
            } else {
                "stored in plaintext"
            }
        ),
        None => ui::yellow("not set (run `bandcoach key set`)"),
    };

    [
        format!("◆ {}", ui::header("bandcoach status")),
        String::new(),
        format!("  version      {}", env!("CARGO_PKG_VERSION")),
        format!("  config       {}", config.config_path.display()),
        String::new(),
        format!("  model        {}", ui::value(&config.provider.model)),
        format!("  endpoint     {}", config.provider.base_url),
        format!("  temperature  {:.2}", config.provider.temperature),
        format!("  timeout      {}s", config.request.timeout_secs),
        format!("  log level    {}", config.logging.level),
        format!("  api key      {credential}"),
    ]
    .join("\n")
}
