use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub supabase: SupabaseConfig,
    pub emailjs: EmailJsConfig,
}

/// Credentials for the booking RPC. Empty values mean the deployment has
/// no backend; submissions then fail with an operator-facing message.
#[derive(Clone, Debug, Default)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// EmailJS credentials. Absence turns the mailer into a silent no-op.
#[derive(Clone, Debug, Default)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailJsConfig {
    pub fn is_configured(&self) -> bool {
        !self.service_id.trim().is_empty()
            && !self.template_id.trim().is_empty()
            && !self.public_key.trim().is_empty()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            supabase: SupabaseConfig {
                url: env::var("SUPABASE_URL").unwrap_or_default(),
                anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            },
            emailjs: EmailJsConfig {
                service_id: env::var("EMAILJS_SERVICE_ID").unwrap_or_default(),
                template_id: env::var("EMAILJS_TEMPLATE_ID").unwrap_or_default(),
                public_key: env::var("EMAILJS_PUBLIC_KEY").unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_configured_needs_both_values() {
        assert!(!SupabaseConfig::default().is_configured());
        assert!(!SupabaseConfig { url: "https://x.supabase.co".into(), anon_key: "".into() }
            .is_configured());
        assert!(!SupabaseConfig { url: "  ".into(), anon_key: "key".into() }.is_configured());
        assert!(SupabaseConfig { url: "https://x.supabase.co".into(), anon_key: "key".into() }
            .is_configured());
    }

    #[test]
    fn test_emailjs_configured_needs_all_three_values() {
        assert!(!EmailJsConfig::default().is_configured());
        assert!(!EmailJsConfig {
            service_id: "s".into(),
            template_id: "t".into(),
            public_key: "".into()
        }
        .is_configured());
        assert!(EmailJsConfig {
            service_id: "s".into(),
            template_id: "t".into(),
            public_key: "k".into()
        }
        .is_configured());
    }
}
