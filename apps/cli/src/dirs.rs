use std::path::PathBuf;

const WORKBOOKS_DIR_NAME: &str = "workbooks";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

pub fn resolve_data_dir() -> Result<DataDirResolution, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    let base = if cfg!(target_os = "macos") {
        PathBuf::from(&home)
            .join("Library")
            .join("Application Support")
    } else {
        PathBuf::from(&home).join(".local").join("share")
    };

    let candidates = [base.join("Funnel Dash"), base.join("funnel-dash")];

    for candidate in candidates {
        if candidate.join(WORKBOOKS_DIR_NAME).exists() {
            return Ok(DataDirResolution {
                dir: candidate,
                matched_existing: true,
            });
        }
    }

    Ok(DataDirResolution {
        dir: base.join("funnel-dash"),
        matched_existing: false,
    })
}
