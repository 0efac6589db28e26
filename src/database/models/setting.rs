use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder shown instead of a configured guest password. Saving it back
/// leaves the stored password untouched.
pub const MASKED_PASSWORD: &str = "********";

/// Global dashboard configuration, one row in `nav_setting`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Setting {
    pub id: i64,
    pub favicon: String,
    pub title: String,
    pub gov_record: String,
    pub logo192: String,
    pub logo512: String,
    pub hide_admin: bool,
    pub hide_github: bool,
    pub jump_target_blank: bool,
    #[serde(rename = "customJS")]
    pub custom_js: String,
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    /// Always empty or [`MASKED_PASSWORD`] on the way out
    pub guest_password: String,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            id: 1,
            favicon: "favicon.ico".to_string(),
            title: "Van Nav".to_string(),
            gov_record: String::new(),
            logo192: "logo192.png".to_string(),
            logo512: "logo512.png".to_string(),
            hide_admin: false,
            hide_github: false,
            jump_target_blank: true,
            custom_js: String::new(),
            custom_css: String::new(),
            guest_password: String::new(),
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SettingRow {
    pub id: i64,
    pub favicon: Option<String>,
    pub title: Option<String>,
    #[sqlx(rename = "govRecord")]
    pub gov_record: Option<String>,
    pub logo192: Option<String>,
    pub logo512: Option<String>,
    #[sqlx(rename = "hideAdmin")]
    pub hide_admin: Option<bool>,
    #[sqlx(rename = "hideGithub")]
    pub hide_github: Option<bool>,
    #[sqlx(rename = "jumpTargetBlank")]
    pub jump_target_blank: Option<bool>,
    #[sqlx(rename = "customJS")]
    pub custom_js: Option<String>,
    #[sqlx(rename = "customCSS")]
    pub custom_css: Option<String>,
    #[sqlx(rename = "guestPassword")]
    pub guest_password: Option<String>,
}

impl SettingRow {
    /// Convert to the public shape, replacing any stored password with the mask
    pub fn into_masked(self) -> Setting {
        let guest_password = match self.guest_password.as_deref() {
            Some(p) if !p.is_empty() => MASKED_PASSWORD.to_string(),
            _ => String::new(),
        };
        Setting {
            id: self.id,
            favicon: self.favicon.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            gov_record: self.gov_record.unwrap_or_default(),
            logo192: self.logo192.unwrap_or_default(),
            logo512: self.logo512.unwrap_or_default(),
            hide_admin: self.hide_admin.unwrap_or(false),
            hide_github: self.hide_github.unwrap_or(false),
            jump_target_blank: self.jump_target_blank.unwrap_or(true),
            custom_js: self.custom_js.unwrap_or_default(),
            custom_css: self.custom_css.unwrap_or_default(),
            guest_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(password: Option<&str>) -> SettingRow {
        SettingRow {
            id: 3,
            favicon: None,
            title: Some("Home".to_string()),
            gov_record: None,
            logo192: None,
            logo512: None,
            hide_admin: None,
            hide_github: Some(true),
            jump_target_blank: None,
            custom_js: None,
            custom_css: None,
            guest_password: password.map(str::to_string),
        }
    }

    #[test]
    fn stored_password_is_masked() {
        let setting = row(Some("hunter2")).into_masked();
        assert_eq!(setting.guest_password, MASKED_PASSWORD);
        assert_eq!(setting.title, "Home");
        assert!(setting.hide_github);
    }

    #[test]
    fn empty_or_null_password_stays_empty() {
        assert_eq!(row(None).into_masked().guest_password, "");
        assert_eq!(row(Some("")).into_masked().guest_password, "");
    }

    #[test]
    fn null_jump_target_blank_defaults_to_true() {
        let setting = row(None).into_masked();
        assert!(setting.jump_target_blank);
        assert!(!setting.hide_admin);
    }

    #[test]
    fn json_uses_camel_case_names() {
        let value = serde_json::to_value(Setting::default()).unwrap();
        assert_eq!(value["jumpTargetBlank"], true);
        assert!(value.get("customJS").is_some());
        assert!(value.get("govRecord").is_some());
    }
}
