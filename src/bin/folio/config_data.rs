use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "content"

# Articles can also be directories holding an index file plus their images
[defaults]
index_base_name = "index"
page_size = 10

[server]
address = "127.0.0.1"
port = 8001

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> Result<()> {
    let mut file = File::create(file_path)
        .with_context(|| format!("Creating {}", file_path.display()))?;
    file.write_all(CONFIG_SAMPLE.as_bytes())?;
    Ok(())
}
