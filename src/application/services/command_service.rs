use crate::application::errors::error_chain;
use crate::application::services::ExtensionManager;
use crate::domain::entities::{
    Embed, ExtensionId, Reply, UnloadOutcome, COLOR_FAILURE, COLOR_STATUS,
};
use crate::domain::traits::ExtensionHost;

/// Owner commands for managing extensions. Each call yields exactly one reply.
pub struct ExtensionCommands;

impl ExtensionCommands {
    /// `load <module>`
    pub async fn load<H: ExtensionHost>(manager: &mut ExtensionManager<H>, module: &str) -> Reply {
        let id = ExtensionId::new(module);
        let result = manager.load_one(&id).await;

        match result.error() {
            None => Reply::text(format!(":white_check_mark: Successfully loaded {}", module)),
            Some(e) => Embed::new(format!("Failed to load `{}`", module), COLOR_FAILURE)
                .with_description(format!("```\n{}\n```", error_chain(e)))
                .into(),
        }
    }

    /// `unload <module>`
    pub async fn unload<H: ExtensionHost>(manager: &mut ExtensionManager<H>, module: &str) -> Reply {
        let id = ExtensionId::new(module);

        match manager.unload_one(&id).await {
            UnloadOutcome::Unloaded => Reply::text(format!(":white_check_mark: Unloaded {}", module)),
            UnloadOutcome::NotLoaded => Reply::text(format!(":x: {} is not loaded", module)),
            UnloadOutcome::Failed(e) => Reply::text(format!(
                ":x: Failed to unload {}: {}",
                module,
                error_chain(&e)
            )),
        }
    }

    /// `extensions`
    pub fn list<H: ExtensionHost>(manager: &ExtensionManager<H>) -> Reply {
        let statuses = match manager.statuses() {
            Ok(s) => s,
            Err(e) => {
                return Reply::text(format!(":x: Could not list extensions: {}", error_chain(&e)))
            }
        };

        statuses
            .into_iter()
            .fold(Embed::new("Extension Status", COLOR_STATUS), |embed, (id, loaded)| {
                let marker = if loaded { ":white_check_mark:" } else { ":x:" };
                embed.with_field(id.to_string(), marker)
            })
            .into()
    }

    /// `reloadall`
    pub async fn reload_all<H: ExtensionHost>(manager: &mut ExtensionManager<H>) -> Reply {
        let results = match manager.reload_all().await {
            Ok(r) => r,
            Err(e) => {
                return Reply::text(format!(
                    ":x: Could not discover extensions: {}",
                    error_chain(&e)
                ))
            }
        };

        let failed: Vec<String> = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.id.to_string())
            .collect();

        if failed.is_empty() {
            Reply::text(":white_check_mark: Successfully reloaded all extensions")
        } else {
            Reply::text(format!(":x: Failed to reload {}", failed.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::extension_service::tests::{FakeHost, ListSource};

    fn manager(host: FakeHost, ids: Vec<&'static str>) -> ExtensionManager<FakeHost> {
        ExtensionManager::new(host, Box::new(ListSource(ids)))
    }

    #[tokio::test]
    async fn test_load_success_reply() {
        let mut mgr = manager(FakeHost::default(), vec!["ranks"]);

        let reply = ExtensionCommands::load(&mut mgr, "ranks").await;

        assert_eq!(reply.as_text(), Some(":white_check_mark: Successfully loaded ranks"));
    }

    #[tokio::test]
    async fn test_load_failure_reply_has_cause() {
        let mut mgr = manager(FakeHost::failing(&["broken"]), vec!["broken"]);

        let reply = ExtensionCommands::load(&mut mgr, "broken").await;

        let embed = reply.as_embed().expect("failure should be an embed");
        assert_eq!(embed.title, "Failed to load `broken`");
        assert_eq!(embed.color, COLOR_FAILURE);
        let description = embed.description.as_deref().unwrap();
        assert!(description.starts_with("```\n"));
        assert!(description.contains("setup exploded"));
    }

    #[tokio::test]
    async fn test_unload_replies() {
        let mut mgr = manager(FakeHost::default(), vec!["ranks"]);

        let reply = ExtensionCommands::unload(&mut mgr, "ranks").await;
        assert_eq!(reply.as_text(), Some(":x: ranks is not loaded"));

        ExtensionCommands::load(&mut mgr, "ranks").await;
        let reply = ExtensionCommands::unload(&mut mgr, "ranks").await;
        assert_eq!(reply.as_text(), Some(":white_check_mark: Unloaded ranks"));
    }

    #[tokio::test]
    async fn test_extensions_lists_every_module() {
        let mut mgr = manager(FakeHost::failing(&["broken"]), vec!["ranks", "broken", "audit"]);
        mgr.load_one(&ExtensionId::new("ranks")).await;
        mgr.load_one(&ExtensionId::new("broken")).await;

        let reply = ExtensionCommands::list(&mgr);

        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.title, "Extension Status");
        assert_eq!(embed.color, COLOR_STATUS);
        let fields: Vec<(&str, &str)> = embed
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("audit", ":x:"),
                ("broken", ":x:"),
                ("ranks", ":white_check_mark:"),
            ]
        );
    }

    /// Real cog directory with one working cog and two without an entry point
    #[tokio::test]
    async fn test_extensions_with_real_cog_host() {
        use crate::cogs::CogCatalog;
        use crate::infrastructure::cogs::{CogHost, DirectorySource};
        use crate::infrastructure::config::Config;
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ranks.yaml"), "description: The ranking system.\n").unwrap();
        std::fs::write(dir.path().join("audit.yaml"), "").unwrap();
        std::fs::create_dir(dir.path().join("moderation")).unwrap();
        std::fs::write(dir.path().join("moderation").join("bans.yaml"), "").unwrap();

        let config = Arc::new(Config { guilds: Default::default() });
        let host = CogHost::new(dir.path(), CogCatalog::builtin(), config);
        let mut mgr = ExtensionManager::new(host, Box::new(DirectorySource::new(dir.path())));

        let reply = ExtensionCommands::reload_all(&mut mgr).await;
        assert_eq!(reply.as_text(), Some(":x: Failed to reload audit, moderation.bans"));

        let reply = ExtensionCommands::list(&mgr);
        let fields: Vec<(String, String)> = reply
            .as_embed()
            .unwrap()
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("audit".to_string(), ":x:".to_string()),
                ("moderation.bans".to_string(), ":x:".to_string()),
                ("ranks".to_string(), ":white_check_mark:".to_string()),
            ]
        );

        let reply = ExtensionCommands::load(&mut mgr, "ranks").await;
        assert_eq!(reply.as_text(), Some(":white_check_mark: Successfully loaded ranks"));
        assert_eq!(mgr.registry().get(&ExtensionId::new("ranks")).unwrap().reloads, 1);
    }

    #[tokio::test]
    async fn test_reload_all_success() {
        let mut mgr = manager(FakeHost::default(), vec!["ranks", "audit"]);

        let reply = ExtensionCommands::reload_all(&mut mgr).await;

        assert_eq!(
            reply.as_text(),
            Some(":white_check_mark: Successfully reloaded all extensions")
        );
    }

    #[tokio::test]
    async fn test_reload_all_names_failures() {
        let mut mgr = manager(FakeHost::failing(&["b", "d"]), vec!["a", "b", "c", "d"]);

        let reply = ExtensionCommands::reload_all(&mut mgr).await;

        assert_eq!(reply.as_text(), Some(":x: Failed to reload b, d"));
    }
}
