//! Inspect or change the stored theme preference

use anyhow::Result;

use crate::theme::{Theme, ThemeController};
use crate::Folio;

/// What to do with the theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAction {
    Get,
    Set(Theme),
    Toggle,
}

pub fn run(folio: &Folio, action: ThemeAction) -> Result<()> {
    let mut controller = folio.theme();
    let theme = apply(&mut controller, action);
    println!("{}", theme);
    Ok(())
}

fn apply(controller: &mut ThemeController, action: ThemeAction) -> Theme {
    match action {
        ThemeAction::Get => controller.get(),
        ThemeAction::Set(theme) => controller.set(theme),
        ThemeAction::Toggle => controller.toggle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeStorage;

    #[test]
    fn test_theme_actions_persist() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        assert_eq!(apply(&mut folio.theme(), ThemeAction::Get), Theme::Dark);
        assert_eq!(apply(&mut folio.theme(), ThemeAction::Toggle), Theme::Light);
        assert_eq!(apply(&mut folio.theme(), ThemeAction::Get), Theme::Light);
        assert_eq!(folio.storage().get("theme").as_deref(), Some("light"));

        apply(&mut folio.theme(), ThemeAction::Set(Theme::Dark));
        assert_eq!(folio.theme().get(), Theme::Dark);
    }
}
