//! Mustache-style templating for the cluster scripts.
//!
//! Supported tags:
//! - `{{name}}` / `{{{name}}}`: variable, values go in verbatim (shell, not HTML)
//! - `{{#name}}...{{/name}}`: section, kept when `name` is set and non-empty
//! - `{{^name}}...{{/name}}`: inverted section, kept when `name` is unset or empty
//! - `{{! comment }}`: dropped
//!
//! Names may contain `-` and `.` and are looked up literally. Unknown names
//! render empty.

use anyhow::bail;
use regex::Regex;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ScriptTemplater {
    tag: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    Section {
        name: String,
        inverted: bool,
        body: Vec<Node>,
    },
}

impl ScriptTemplater {
    pub fn new() -> anyhow::Result<Self> {
        // Triple braces first so `{{{x}}}` is not read as `{` + `{{x}}` + `}`.
        let tag = Regex::new(
            r"\{\{\{\s*(?P<raw>[^{}\s]+)\s*\}\}\}|\{\{\s*(?P<kind>[#^/!]?)\s*(?P<name>[^{}]*?)\s*\}\}",
        )?;
        Ok(Self { tag })
    }

    /// Fails on unbalanced or mismatched section tags.
    pub fn render(&self, text: &str, values: &BTreeMap<String, String>) -> anyhow::Result<String> {
        let nodes = self.parse(text)?;
        let mut out = String::with_capacity(text.len());
        render_nodes(&nodes, values, &mut out);
        Ok(out)
    }

    fn parse(&self, text: &str) -> anyhow::Result<Vec<Node>> {
        // Open sections: (name, inverted, nodes collected before it opened).
        let mut stack: Vec<(String, bool, Vec<Node>)> = Vec::new();
        let mut current: Vec<Node> = Vec::new();
        let mut last = 0;

        for caps in self.tag.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                current.push(Node::Text(text[last..whole.start()].to_string()));
            }
            last = whole.end();

            if let Some(raw) = caps.name("raw") {
                current.push(Node::Var(raw.as_str().to_string()));
                continue;
            }

            let kind = caps.name("kind").map_or("", |m| m.as_str());
            let name = caps.name("name").map_or("", |m| m.as_str()).to_string();
            match kind {
                "!" => {}
                "#" | "^" => {
                    let outer = std::mem::take(&mut current);
                    stack.push((name, kind == "^", outer));
                }
                "/" => {
                    let Some((open, inverted, outer)) = stack.pop() else {
                        bail!("closing tag {{{{/{name}}}}} has no matching section");
                    };
                    if open != name {
                        bail!("section {{{{#{open}}}}} closed by {{{{/{name}}}}}");
                    }
                    let body = std::mem::replace(&mut current, outer);
                    current.push(Node::Section {
                        name,
                        inverted,
                        body,
                    });
                }
                _ => current.push(Node::Var(name)),
            }
        }

        if let Some((open, _, _)) = stack.last() {
            bail!("section {{{{#{open}}}}} is never closed");
        }
        if last < text.len() {
            current.push(Node::Text(text[last..].to_string()));
        }
        Ok(current)
    }
}

fn render_nodes(nodes: &[Node], values: &BTreeMap<String, String>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(name) => {
                if let Some(value) = values.get(name) {
                    out.push_str(value);
                }
            }
            Node::Section {
                name,
                inverted,
                body,
            } => {
                let set = values.get(name).is_some_and(|v| !v.is_empty());
                if set != *inverted {
                    render_nodes(body, values, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values() -> BTreeMap<String, String> {
        [
            ("hadoop-cluster-name", "prod"),
            ("cloud-install-dir", "/opt/cloud"),
            ("dfs.replication", "2"),
            ("empty", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn render(text: &str) -> String {
        ScriptTemplater::new().unwrap().render(text, &values()).unwrap()
    }

    fn render_err(text: &str) -> String {
        ScriptTemplater::new()
            .unwrap()
            .render(text, &values())
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn substitutes_hyphenated_and_dotted_names() {
        assert_eq!(
            render("cd {{cloud-install-dir}} && echo {{ hadoop-cluster-name }} {{dfs.replication}}"),
            "cd /opt/cloud && echo prod 2"
        );
    }

    #[test]
    fn triple_braces_are_unescaped_variables() {
        assert_eq!(render("x={{{cloud-install-dir}}}"), "x=/opt/cloud");
    }

    #[test]
    fn unknown_names_render_empty() {
        assert_eq!(render("[{{nope}}]"), "[]");
    }

    #[test]
    fn shell_syntax_is_left_alone() {
        let script = "#!/bin/bash\nfor f in ${DIRS[@]}; do echo \"$f\" & done\n";
        assert_eq!(render(script), script);
    }

    #[test]
    fn section_with_unset_key_is_dropped() {
        assert_eq!(
            render("a{{#java-home}}export JAVA_HOME={{java-home}}\n{{/java-home}}b"),
            "ab"
        );
        assert_eq!(render("a{{#empty}}x{{/empty}}b"), "ab");
    }

    #[test]
    fn section_with_set_key_is_kept() {
        assert_eq!(
            render("{{#cloud-install-dir}}cd {{cloud-install-dir}}{{/cloud-install-dir}}"),
            "cd /opt/cloud"
        );
    }

    #[test]
    fn inverted_section_is_the_complement() {
        assert_eq!(render("{{^java-home}}no java{{/java-home}}"), "no java");
        assert_eq!(render("{{^dfs.replication}}default{{/dfs.replication}}"), "");
    }

    #[test]
    fn nested_sections_and_comments() {
        assert_eq!(
            render("{{! header }}{{#hadoop-cluster-name}}[{{^nope}}{{hadoop-cluster-name}}{{/nope}}]{{/hadoop-cluster-name}}"),
            "[prod]"
        );
    }

    #[test]
    fn unbalanced_sections_are_errors() {
        assert!(render_err("{{#a}}x").contains("never closed"));
        assert!(render_err("x{{/a}}").contains("no matching section"));
        assert!(render_err("{{#a}}x{{/b}}").contains("closed by"));
    }
}
