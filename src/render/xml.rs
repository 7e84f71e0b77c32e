use crate::derive::KeyValueSet;

/// Render a Hadoop `*-site.xml` configuration file.
///
/// One `<property>` per key, in key order. Names and values are XML-escaped.
pub fn render_hadoop_xml(kv: &KeyValueSet) -> String {
    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="configuration.xsl"?>
<configuration>
"#;
    const FOOTER: &str = "</configuration>\n";

    let mut out = String::from(HEADER);
    for (name, value) in kv.iter() {
        out.push_str("  <property>\n");
        out.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
        out.push_str(&format!("    <value>{}</value>\n", escape_xml(value)));
        out.push_str("  </property>\n");
    }
    out.push_str(FOOTER);
    out
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_properties_in_key_order() {
        let kv: KeyValueSet = [
            ("fs.defaultFS", "hdfs://nn1:9000"),
            ("dfs.replication", "3"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render_hadoop_xml(&kv),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="configuration.xsl"?>
<configuration>
  <property>
    <name>dfs.replication</name>
    <value>3</value>
  </property>
  <property>
    <name>fs.defaultFS</name>
    <value>hdfs://nn1:9000</value>
  </property>
</configuration>
"#
        );
    }

    #[test]
    fn escapes_markup() {
        let kv: KeyValueSet = [("k", "a<b>&\"c'")].into_iter().collect();
        let xml = render_hadoop_xml(&kv);
        assert!(xml.contains("<value>a&lt;b&gt;&amp;&quot;c&apos;</value>"));
    }

    #[test]
    fn empty_set_is_an_empty_configuration() {
        let xml = render_hadoop_xml(&KeyValueSet::new());
        assert!(xml.ends_with("<configuration>\n</configuration>\n"));
    }
}
