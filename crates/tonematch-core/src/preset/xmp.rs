//! Low-level XMP text assembly for Camera Raw settings documents.

use std::fmt::Display;

const CRS_NAMESPACE: &str = "http://ns.adobe.com/camera-raw-settings/1.0/";
const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const PACKET_ID: &str = "W5M0MpCehiHzreSzNTczkc9d";

/// Escape text for use inside an attribute value or element body.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Integer with an explicit `+` when positive.
pub(crate) fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Two-decimal value with an explicit `+` when positive. Never `-0.00`.
pub(crate) fn signed_hundredths(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    if rounded > 0.0 {
        format!("+{rounded:.2}")
    } else if rounded == 0.0 {
        "0.00".to_string()
    } else {
        format!("{rounded:.2}")
    }
}

/// Camera Raw boolean spelling.
pub(crate) fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Builds one `rdf:Description` with `crs:` attributes and child elements.
#[derive(Debug, Default)]
pub(crate) struct Description {
    attributes: Vec<(String, String)>,
    children: String,
}

impl Description {
    pub fn attr(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.attributes
            .push((format!("crs:{name}"), escape(&value.to_string())));
        self
    }

    /// `<crs:{name}><rdf:Alt><rdf:li xml:lang="x-default">text</rdf:li>…`
    pub fn localized(&mut self, name: &str, text: &str) -> &mut Self {
        self.children.push_str(&format!(
            "   <crs:{name}>\n    <rdf:Alt>\n     <rdf:li xml:lang=\"x-default\">{}</rdf:li>\n    </rdf:Alt>\n   </crs:{name}>\n",
            escape(text)
        ));
        self
    }

    /// `<crs:{name}><rdf:Seq>` with one `<rdf:li>` per item.
    pub fn sequence<I, T>(&mut self, name: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.children
            .push_str(&format!("   <crs:{name}>\n    <rdf:Seq>\n"));
        for item in items {
            self.children.push_str(&format!(
                "     <rdf:li>{}</rdf:li>\n",
                escape(&item.to_string())
            ));
        }
        self.children
            .push_str(&format!("    </rdf:Seq>\n   </crs:{name}>\n"));
        self
    }

    /// Render the complete document, optionally inside an `xpacket` wrapper.
    pub fn finish(&self, packet_wrapper: bool) -> String {
        let mut out = String::new();
        if packet_wrapper {
            out.push_str(&format!(
                "<?xpacket begin=\"\u{FEFF}\" id=\"{PACKET_ID}\"?>\n"
            ));
        }
        out.push_str("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n");
        out.push_str(&format!(" <rdf:RDF xmlns:rdf=\"{RDF_NAMESPACE}\">\n"));
        out.push_str("  <rdf:Description rdf:about=\"\"\n");
        out.push_str(&format!("    xmlns:crs=\"{CRS_NAMESPACE}\""));
        for (name, value) in &self.attributes {
            out.push_str(&format!("\n   {name}=\"{value}\""));
        }
        out.push_str(">\n");
        out.push_str(&self.children);
        out.push_str("  </rdf:Description>\n </rdf:RDF>\n</x:xmpmeta>\n");
        if packet_wrapper {
            out.push_str("<?xpacket end=\"w\"?>\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"Tom & "Jerry" <look>'s"#),
            "Tom &amp; &quot;Jerry&quot; &lt;look&gt;&apos;s"
        );
    }

    #[test]
    fn test_signed_formatting() {
        assert_eq!(signed(15), "+15");
        assert_eq!(signed(0), "0");
        assert_eq!(signed(-7), "-7");
        assert_eq!(signed_hundredths(1.02), "+1.02");
        assert_eq!(signed_hundredths(-0.5), "-0.50");
        assert_eq!(signed_hundredths(-0.001), "0.00");
        assert_eq!(signed_hundredths(0.0), "0.00");
    }

    #[test]
    fn test_signed_values_parse_back() {
        assert_eq!(signed(42).parse::<i32>().unwrap(), 42);
        assert_eq!(signed_hundredths(2.5).parse::<f64>().unwrap(), 2.5);
    }

    #[test]
    fn test_packet_wrapper_is_optional() {
        let mut description = Description::default();
        description.attr("HasSettings", flag(true));
        let wrapped = description.finish(true);
        assert!(wrapped.starts_with("<?xpacket begin=\"\u{FEFF}\""));
        assert!(wrapped.trim_end().ends_with("<?xpacket end=\"w\"?>"));

        let bare = description.finish(false);
        assert!(bare.starts_with("<x:xmpmeta"));
        assert!(!bare.contains('\u{FEFF}'));
        assert!(bare.contains("crs:HasSettings=\"True\""));
    }

    #[test]
    fn test_sequence_and_localized_children() {
        let mut description = Description::default();
        description
            .localized("Name", "A & B")
            .sequence("ToneCurvePV2012", ["0, 0", "255, 255"]);
        let text = description.finish(false);
        assert!(text.contains("<rdf:li xml:lang=\"x-default\">A &amp; B</rdf:li>"));
        assert!(text.contains("<rdf:li>0, 0</rdf:li>\n     <rdf:li>255, 255</rdf:li>"));
    }
}
