//! Configuration resolution: CLI flags > environment variables > defaults.
//!
//! The clap parser leaves every option unset-able so precedence stays
//! explicit: [`Config::resolve`] merges flag values with an injectable
//! environment lookup, and tests pass a closure instead of mutating process
//! env vars.

use std::path::PathBuf;

use clap::Parser;

use crate::error::AppError;

pub const ENV_KUBECONFIG: &str = "KUBECONFIG";
pub const ENV_NAMESPACE: &str = "NAMESPACE";
pub const ENV_WEBHOOK_HOST: &str = "OPERATOR_WEBHOOK_HOST";
pub const ENV_WEBHOOK_PORT: &str = "OPERATOR_WEBHOOK_PORT";

pub const DEFAULT_NAMESPACE: &str = "eirini";
pub const DEFAULT_WEBHOOK_PORT: u16 = 2999;

/// Command-line surface. All options are optional at parse time; defaults
/// and env bindings are applied during [`Config::resolve`].
#[derive(Parser, Debug, Default)]
#[command(name = "eirinix-sample", version, about = "hello-world extension for Eirini")]
pub struct Cli {
    /// Path to a kubeconfig, not required in-cluster (env: KUBECONFIG)
    #[arg(short = 'c', long)]
    pub kubeconfig: Option<String>,

    /// Namespace to watch for Eirini apps (env: NAMESPACE)
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Hostname/IP under which the webhook server can be reached from the
    /// cluster (env: OPERATOR_WEBHOOK_HOST)
    #[arg(short = 'w', long)]
    pub operator_webhook_host: Option<String>,

    /// Port the webhook server listens on (env: OPERATOR_WEBHOOK_PORT)
    #[arg(short = 'p', long)]
    pub operator_webhook_port: Option<u16>,
}

/// Fully-resolved run configuration. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub namespace: String,
    /// Advertised and bound webhook address. Empty until validated; an empty
    /// host fails [`Config::validate`].
    pub webhook_host: String,
    pub webhook_port: u16,
    /// `None` means in-cluster auto-discovery.
    pub kubeconfig: Option<PathBuf>,
}

impl Config {
    /// Merge CLI flags with environment lookups and defaults.
    ///
    /// `lookup` is the environment accessor; production passes
    /// `|name| std::env::var(name).ok()`.
    pub fn resolve(
        cli: Cli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, AppError> {
        let namespace = cli
            .namespace
            .or_else(|| lookup(ENV_NAMESPACE))
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let webhook_host = cli
            .operator_webhook_host
            .or_else(|| lookup(ENV_WEBHOOK_HOST))
            .unwrap_or_default();

        let webhook_port = match cli.operator_webhook_port {
            Some(port) => port,
            None => match lookup(ENV_WEBHOOK_PORT) {
                Some(raw) => raw.trim().parse().map_err(|e| {
                    AppError::Config(format!("invalid {ENV_WEBHOOK_PORT} value '{raw}': {e}"))
                })?,
                None => DEFAULT_WEBHOOK_PORT,
            },
        };

        // Empty string means in-cluster discovery, same as unset.
        let kubeconfig = cli
            .kubeconfig
            .or_else(|| lookup(ENV_KUBECONFIG))
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            namespace,
            webhook_host,
            webhook_port,
            kubeconfig,
        })
    }

    /// The only validation the bootstrap performs: the webhook host is
    /// required and has no default.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.webhook_host.is_empty() {
            return Err(AppError::Config(format!(
                "required flag 'operator-webhook-host' not set (env variable: {ENV_WEBHOOK_HOST})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn no_env(_name: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_only_host_is_set() {
        let env = env_of(&[(ENV_WEBHOOK_HOST, "foo")]);
        let cfg = Config::resolve(Cli::default(), env).unwrap();
        assert_eq!(cfg.namespace, "eirini");
        assert_eq!(cfg.webhook_host, "foo");
        assert_eq!(cfg.webhook_port, 2999);
        assert_eq!(cfg.kubeconfig, None);
        cfg.validate().unwrap();
    }

    #[test]
    fn flag_beats_env_for_namespace() {
        let cli = Cli {
            namespace: Some("custom".into()),
            ..Cli::default()
        };
        let env = env_of(&[(ENV_NAMESPACE, "other"), (ENV_WEBHOOK_HOST, "foo")]);
        let cfg = Config::resolve(cli, env).unwrap();
        assert_eq!(cfg.namespace, "custom");
    }

    #[test]
    fn flag_beats_env_for_host() {
        let cli = Cli {
            operator_webhook_host: Some("10.0.0.1".into()),
            ..Cli::default()
        };
        let env = env_of(&[(ENV_WEBHOOK_HOST, "10.0.0.2")]);
        let cfg = Config::resolve(cli, env).unwrap();
        assert_eq!(cfg.webhook_host, "10.0.0.1");
    }

    #[test]
    fn env_port_parses() {
        let env = env_of(&[(ENV_WEBHOOK_HOST, "foo"), (ENV_WEBHOOK_PORT, "4000")]);
        let cfg = Config::resolve(Cli::default(), env).unwrap();
        assert_eq!(cfg.webhook_port, 4000);
    }

    #[test]
    fn bad_env_port_errors() {
        let env = env_of(&[(ENV_WEBHOOK_PORT, "not-a-port")]);
        let err = Config::resolve(Cli::default(), env).unwrap_err();
        assert!(err.to_string().contains(ENV_WEBHOOK_PORT));
    }

    #[test]
    fn port_flag_beats_env_port() {
        let cli = Cli {
            operator_webhook_port: Some(5000),
            ..Cli::default()
        };
        let env = env_of(&[(ENV_WEBHOOK_PORT, "4000")]);
        let cfg = Config::resolve(cli, env).unwrap();
        assert_eq!(cfg.webhook_port, 5000);
    }

    #[test]
    fn missing_host_fails_validation() {
        let cfg = Config::resolve(Cli::default(), no_env).unwrap();
        let err = cfg.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("operator-webhook-host"));
        assert!(msg.contains(ENV_WEBHOOK_HOST));
    }

    #[test]
    fn empty_kubeconfig_means_in_cluster() {
        let env = env_of(&[(ENV_KUBECONFIG, ""), (ENV_WEBHOOK_HOST, "foo")]);
        let cfg = Config::resolve(Cli::default(), env).unwrap();
        assert_eq!(cfg.kubeconfig, None);
    }

    #[test]
    fn kubeconfig_env_resolves_to_path() {
        let env = env_of(&[(ENV_KUBECONFIG, "/home/me/.kube/config")]);
        let cfg = Config::resolve(Cli::default(), env).unwrap();
        assert_eq!(cfg.kubeconfig, Some(PathBuf::from("/home/me/.kube/config")));
    }

    #[test]
    fn short_flags_parse() {
        let cli =
            Cli::try_parse_from(["eirinix-sample", "-w", "10.0.0.1", "-p", "4000", "-n", "dev"])
                .unwrap();
        assert_eq!(cli.operator_webhook_host.as_deref(), Some("10.0.0.1"));
        assert_eq!(cli.operator_webhook_port, Some(4000));
        assert_eq!(cli.namespace.as_deref(), Some("dev"));
    }

    #[test]
    fn long_flags_parse() {
        let cli = Cli::try_parse_from([
            "eirinix-sample",
            "--operator-webhook-host=host.example",
            "--kubeconfig=/tmp/kc",
        ])
        .unwrap();
        assert_eq!(cli.operator_webhook_host.as_deref(), Some("host.example"));
        assert_eq!(cli.kubeconfig.as_deref(), Some("/tmp/kc"));
    }
}
