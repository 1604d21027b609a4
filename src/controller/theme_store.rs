use crate::storage::{Storage, THEME_KEY};

use super::ScreenEffects;

/// Selectable themes, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    #[default]
    Homebrew,
    Ocean,
    RedSands,
    SilverAerogel,
    Basic,
}

impl ThemeId {
    pub const CATALOG: [ThemeId; 5] = [
        ThemeId::Homebrew,
        ThemeId::Ocean,
        ThemeId::RedSands,
        ThemeId::SilverAerogel,
        ThemeId::Basic,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ThemeId::Homebrew => "homebrew",
            ThemeId::Ocean => "ocean",
            ThemeId::RedSands => "red-sands",
            ThemeId::SilverAerogel => "silver-aerogel",
            ThemeId::Basic => "basic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeId::Homebrew => "Homebrew",
            ThemeId::Ocean => "Ocean",
            ThemeId::RedSands => "Red Sands",
            ThemeId::SilverAerogel => "Silver Aerogel",
            ThemeId::Basic => "Basic",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::CATALOG.iter().copied().find(|t| t.id() == id)
    }

    pub fn index(self) -> usize {
        Self::CATALOG.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Persisted theme selection.
pub struct ThemeStore {
    storage: Box<dyn Storage>,
}

impl ThemeStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn catalog(&self) -> &'static [ThemeId] {
        &ThemeId::CATALOG
    }

    /// The persisted theme, or the first catalog entry when nothing valid
    /// is stored.
    pub fn get_active(&self) -> ThemeId {
        self.storage
            .get(THEME_KEY)
            .and_then(|id| ThemeId::from_id(&id))
            .unwrap_or(ThemeId::CATALOG[0])
    }

    /// Persists and applies `id`. Ids outside the catalog leave everything
    /// unchanged and return `None`.
    pub fn set_active<E: ScreenEffects + ?Sized>(&mut self, id: &str, effects: &mut E) -> Option<ThemeId> {
        let Some(theme) = ThemeId::from_id(id) else {
            tracing::debug!("Rejected unknown theme id {:?}", id);
            return None;
        };
        self.storage.set(THEME_KEY, theme.id());
        effects.apply_theme(theme);
        tracing::info!("Theme set to {}", theme.id());
        Some(theme)
    }

    /// Applies the active theme to a freshly loaded page.
    pub fn apply<E: ScreenEffects + ?Sized>(&self, effects: &mut E) -> ThemeId {
        let theme = self.get_active();
        effects.apply_theme(theme);
        theme
    }
}
