//! Filesystem side: lay derived artifacts out under the unpack root.
//!
//! Every file is rewritten whole (open, write, close). Parent directories are
//! created on demand.

use crate::derive::{
    AccumuloArtifacts, EnvPatch, HadoopArtifacts, HostList, KeyValueSet, Plan, ZookeeperArtifacts,
};
use crate::render::{ScriptTemplater, render_hadoop_xml, render_properties};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const HADOOP_CONF_DIR: &str = "hadoop/etc/hadoop";
pub const ZOOKEEPER_CONF_DIR: &str = "zookeeper/conf";
pub const ACCUMULO_CONF_DIR: &str = "accumulo/conf";
pub const BIN_DIR: &str = "bin";

const ENV_PATCH_BEGIN: &str = "# BEGIN cluster-conf generated environment";
const ENV_PATCH_END: &str = "# END cluster-conf generated environment";

pub struct ArtifactWriter {
    root: PathBuf,
    templater: ScriptTemplater,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        Ok(Self {
            root: root.into(),
            templater: ScriptTemplater::new()?,
        })
    }

    /// Write every artifact of `plan`, then template the scripts.
    pub fn write_plan(&self, plan: &Plan) -> anyhow::Result<()> {
        self.write_hadoop(&plan.hadoop)?;
        self.write_zookeeper(&plan.zookeeper)?;
        self.write_accumulo(&plan.accumulo)?;
        self.render_scripts(&plan.scripts)?;
        Ok(())
    }

    pub fn write_hadoop(&self, a: &HadoopArtifacts) -> anyhow::Result<()> {
        let dir = Path::new(HADOOP_CONF_DIR);
        self.write_xml(&dir.join("core-site.xml"), &a.core_site)?;
        self.write_xml(&dir.join("hdfs-site.xml"), &a.hdfs_site)?;
        self.write_xml(&dir.join("yarn-site.xml"), &a.yarn_site)?;
        self.write_xml(&dir.join("mapred-site.xml"), &a.mapred_site)?;
        self.prepend_env(&dir.join("hadoop-env.sh"), &a.env_patch)?;
        self.write_hosts(&dir.join("slaves"), &a.slaves)?;
        Ok(())
    }

    pub fn write_zookeeper(&self, a: &ZookeeperArtifacts) -> anyhow::Result<()> {
        let path = Path::new(ZOOKEEPER_CONF_DIR).join("zoo.conf");
        self.write_file(&path, &render_properties(&a.zoo_conf, "zookeeper properties"))
    }

    pub fn write_accumulo(&self, a: &AccumuloArtifacts) -> anyhow::Result<()> {
        let dir = Path::new(ACCUMULO_CONF_DIR);
        self.write_xml(&dir.join("accumulo-site.xml"), &a.site)?;
        self.write_hosts(&dir.join("slaves"), &a.slaves)?;
        self.write_hosts(&dir.join("masters"), &a.masters)?;
        self.write_hosts(&dir.join("monitor"), &a.monitor)?;
        self.write_hosts(&dir.join("tracers"), &a.tracers)?;
        self.write_hosts(&dir.join("gc"), &a.gc)?;
        Ok(())
    }

    /// Render every file in `bin/` (symlinks followed) against `values` and mark it
    /// executable. Files that are not UTF-8 are left untouched.
    ///
    /// Returns the number of scripts rewritten.
    pub fn render_scripts(&self, values: &BTreeMap<String, String>) -> anyhow::Result<usize> {
        let dir = self.root.join(BIN_DIR);
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "script directory not found, skipping templating");
            return Ok(0);
        }

        let mut scripts = Vec::new();
        for entry in
            fs::read_dir(&dir).with_context(|| format!("list scripts in {}", dir.display()))?
        {
            let path = entry
                .with_context(|| format!("list scripts in {}", dir.display()))?
                .path();
            // Follows symlinks. A listed entry that is not found is a dangling link.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "script link target not found, skipping");
                    continue;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("stat script {}", path.display()));
                }
            };
            if meta.is_file() {
                scripts.push(path);
            }
        }
        scripts.sort();

        let mut rendered_count = 0;
        for path in &scripts {
            let bytes =
                fs::read(path).with_context(|| format!("read script {}", path.display()))?;
            let Ok(text) = String::from_utf8(bytes) else {
                warn!(path = %path.display(), "script is not valid UTF-8, skipping");
                continue;
            };
            let rendered = self
                .templater
                .render(&text, values)
                .with_context(|| format!("render script {}", path.display()))?;
            fs::write(path, rendered)
                .with_context(|| format!("write script {}", path.display()))?;
            set_executable(path)?;
            rendered_count += 1;
            debug!(path = %path.display(), "rendered script");
        }

        info!(count = rendered_count, dir = %dir.display(), "rendered scripts");
        Ok(rendered_count)
    }

    fn write_xml(&self, rel: &Path, kv: &KeyValueSet) -> anyhow::Result<()> {
        self.write_file(rel, &render_hadoop_xml(kv))
    }

    fn write_hosts(&self, rel: &Path, hosts: &HostList) -> anyhow::Result<()> {
        self.write_file(rel, &hosts.render())
    }

    /// Put `patch` at the top of an existing script, replacing an earlier patch block.
    fn prepend_env(&self, rel: &Path, patch: &EnvPatch) -> anyhow::Result<()> {
        let path = self.root.join(rel);
        let existing = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read env script {}", path.display()));
            }
        };

        let contents = format!("{}\n{}", env_block(patch), strip_env_block(&existing));
        self.write_file(rel, &contents)
    }

    fn write_file(&self, rel: &Path, contents: &str) -> anyhow::Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        Ok(())
    }
}

fn env_block(patch: &EnvPatch) -> String {
    let mut block = String::new();
    block.push_str(ENV_PATCH_BEGIN);
    block.push('\n');
    for line in patch.lines() {
        block.push_str(&line);
        block.push('\n');
    }
    block.push_str(ENV_PATCH_END);
    block.push('\n');
    block
}

/// Drop a leading generated block (and the blank line after it), if present.
fn strip_env_block(text: &str) -> &str {
    if !text.starts_with(ENV_PATCH_BEGIN) {
        return text;
    }
    match text.find(ENV_PATCH_END) {
        Some(pos) => {
            let rest = &text[pos + ENV_PATCH_END.len()..];
            let rest = rest.strip_prefix('\n').unwrap_or(rest);
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => text,
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("chmod {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
