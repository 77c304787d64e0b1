//! JSON projection of a node tree.
use {
    super::Asn1Node,
    crate::error::Result,
    serde::Serialize,
    std::io::Write,
};

/// Field order is the key order of the output.
#[derive(Serialize)]
struct DisplayJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name:        Option<&'a str>,
    #[serde(rename = "type")]
    kind:        String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children:    Vec<DisplayJson<'a>>,
}

impl<'a> From<&'a Asn1Node> for DisplayJson<'a> {
    fn from(node: &'a Asn1Node) -> Self {
        Self {
            name:        node.field_name(),
            kind:        node.type_string(),
            value:       node.value_string(),
            explanation: node.explanation(),
            children:    node.children().iter().map(Self::from).collect(),
        }
    }
}

impl Asn1Node {
    /// Writes the tree as pretty printed JSON without a trailing newline.
    pub fn write_display_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &DisplayJson::from(self))?;
        Ok(())
    }

    pub fn to_display_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&DisplayJson::from(self))?)
    }
}
