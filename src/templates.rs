use std::path::Path;
use std::sync::OnceLock;
use tera::Tera;
use tracing::{error, info};

pub const DASHBOARD: &str = "index.html";

const EMBEDDED_DASHBOARD: &str = include_str!("../templates/index.html");

static TERA: OnceLock<Tera> = OnceLock::new();

/// Loads the dashboard from `template_dir` on first use, falling back to the
/// copy compiled into the binary.
pub fn get_tera(template_dir: &Path) -> &'static Tera {
    TERA.get_or_init(|| {
        let on_disk = template_dir.join(DASHBOARD);
        if on_disk.exists() {
            let mut tera = Tera::default();
            match tera.add_template_file(&on_disk, Some(DASHBOARD)) {
                Ok(()) => {
                    info!("Loaded dashboard template from {}", on_disk.display());
                    return tera;
                }
                Err(e) => error!("Failed to load {}: {}", on_disk.display(), e),
            }
        }

        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template(DASHBOARD, EMBEDDED_DASHBOARD) {
            error!("Embedded dashboard template is invalid: {}", e);
        }
        tera
    })
}
