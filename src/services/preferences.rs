//! Display preferences service
//!
//! Theme, accent colour, dashboard widget visibility and the onboarding
//! flag. Each lives under its own store key and defaults when unset.

use tracing::info;

use crate::error::SpendlogResult;
use crate::models::{Accent, Theme, Widget, WidgetVisibility};
use crate::storage::Storage;

/// Service for display preferences
pub struct PreferencesService<'a> {
    storage: &'a Storage,
}

impl<'a> PreferencesService<'a> {
    /// Create a new preferences service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> SpendlogResult<Theme> {
        self.storage.theme()
    }

    pub fn set_theme(&self, theme: Theme) -> SpendlogResult<()> {
        self.storage.save_theme(theme)?;
        info!(%theme, "Set theme");
        Ok(())
    }

    pub fn accent(&self) -> SpendlogResult<Accent> {
        self.storage.accent()
    }

    pub fn set_accent(&self, accent: Accent) -> SpendlogResult<()> {
        self.storage.save_accent(accent)?;
        info!(%accent, "Set accent");
        Ok(())
    }

    pub fn widgets(&self) -> SpendlogResult<WidgetVisibility> {
        self.storage.widget_visibility()
    }

    /// Show or hide one widget
    pub fn set_widget(&self, widget: Widget, visible: bool) -> SpendlogResult<WidgetVisibility> {
        let mut widgets = self.storage.widget_visibility()?;
        widgets.set(widget, visible);
        self.storage.save_widget_visibility(&widgets)?;
        info!(%widget, visible, "Set widget visibility");
        Ok(widgets)
    }

    /// Flip one widget; returns whether it is now visible
    pub fn toggle_widget(&self, widget: Widget) -> SpendlogResult<bool> {
        let mut widgets = self.storage.widget_visibility()?;
        let visible = widgets.toggle(widget);
        self.storage.save_widget_visibility(&widgets)?;
        info!(%widget, visible, "Toggled widget");
        Ok(visible)
    }

    pub fn onboarding_complete(&self) -> SpendlogResult<bool> {
        self.storage.onboarding_complete()
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> SpendlogResult<()> {
        self.storage.set_onboarding_complete(complete)
    }
}
