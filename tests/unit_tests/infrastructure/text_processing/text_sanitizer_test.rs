use smart_mindmap::infrastructure::text_processing::{
    collapse_whitespace, decode_xml_entities, strip_document_xml_tags,
};

#[test]
fn given_mixed_whitespace_when_collapsing_then_leaves_single_spaces() {
    assert_eq!(collapse_whitespace("  a \t\n b\u{a0}\u{a0}c  "), "a b c");
}

#[test]
fn given_the_five_xml_entities_when_decoding_then_restores_characters() {
    assert_eq!(
        decode_xml_entities("&lt;a&gt; &amp; &apos;b&apos; &quot;c&quot;"),
        "<a> & 'b' \"c\""
    );
}

#[test]
fn given_paragraph_markup_when_stripping_then_paragraphs_become_lines() {
    let xml = r#"<w:body><w:p w:rsidR="1"><w:r><w:t>One</w:t></w:r></w:p><w:p><w:r><w:t>Two</w:t></w:r></w:p></w:body>"#;

    assert_eq!(strip_document_xml_tags(xml), "One\nTwo");
}

#[test]
fn given_runs_of_empty_paragraphs_when_stripping_then_keeps_at_most_one_blank_line() {
    let xml = "<w:p>A</w:p><w:p></w:p><w:p></w:p><w:p></w:p><w:p>B</w:p>";

    assert_eq!(strip_document_xml_tags(xml), "A\n\nB");
}
