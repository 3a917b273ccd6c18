//! Guardpost Admin
//!
//! Content dashboard for CMS pages, banners, email templates, services and
//! support settings.
//!
//! This is the main entry point for the command-line application.

fn main() -> anyhow::Result<()> {
    guardpost_cli::run()
}
