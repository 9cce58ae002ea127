use eventable_config::UiPrefs;

use crate::context::CliError;

pub fn cmd_prefs_show() -> Result<(), CliError> {
    let prefs = UiPrefs::load()?;
    println!("Admin dashboard tab: {}", prefs.admin_dashboard_tab);
    println!("User dashboard tab: {}", prefs.user_dashboard_tab);
    Ok(())
}

pub fn cmd_prefs_set_admin_tab(tab: u32) -> Result<(), CliError> {
    let mut prefs = UiPrefs::load()?;
    prefs.admin_dashboard_tab = tab;
    prefs.save()?;
    println!("Admin dashboard tab set to {tab}");
    Ok(())
}

pub fn cmd_prefs_set_user_tab(tab: u32) -> Result<(), CliError> {
    let mut prefs = UiPrefs::load()?;
    prefs.user_dashboard_tab = tab;
    prefs.save()?;
    println!("User dashboard tab set to {tab}");
    Ok(())
}
