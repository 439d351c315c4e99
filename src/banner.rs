//! Startup banner and farewell.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};
use crate::trip::Shell;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub shell: Shell,
    pub endpoint: &'a str,
    pub policy: &'a str,
    pub settings: &'a str,
}

pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║   F I S H I N G   T R I P   P L A N   ║
   ║    species in, plan out, no guessing  ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   shell     {}
   endpoint  {}
   overlap   {}
   settings  {}

   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.shell,
        info.endpoint,
        info.policy,
        info.settings,
    )
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Print the session summary.
pub fn print_session_summary(submissions: u64) {
    if submissions > 0 {
        println!("session: {submissions} trip request(s)");
    }
    println!("tight lines.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> BannerInfo<'static> {
        BannerInfo {
            shell: Shell::Mobile,
            endpoint: "https://your-backend.example.com/plan_trip",
            policy: "latest",
            settings: "ephemeral",
        }
    }

    #[test]
    fn banner_lists_session_info() {
        let text = banner_text(&info());
        assert!(text.contains("shell     mobile"));
        assert!(text.contains("endpoint  https://your-backend.example.com/plan_trip"));
        assert!(text.contains("overlap   latest"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn print_banner_does_not_panic() {
        print_banner(&info());
    }

    #[test]
    fn print_session_summary_does_not_panic() {
        print_session_summary(0);
        print_session_summary(3);
    }
}
