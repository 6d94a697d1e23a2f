// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-layer encoding behavior: the caller's encoding describes the
//! input text variable, the XML declaration governs character decoding
//! inside the document. A mismatch garbles text by design.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use typeseal_core::{TextCodec, TextEncoding, TypeRegistry};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Quote {
    text: String,
}

const LATIN1_DOCUMENT: &str = "<?xml version=\"1.0\" encoding=\"iso-8859-1\" ?>\
<Quote><text>6.00% p.a. Multi Barrier Reverse Convertible on EURO STOXX 50\u{ae} \
Index, S&amp;P 500\u{ae}, Swiss Market Index\u{ae}</text></Quote>";

fn xml_codec() -> TextCodec {
    TextCodec::xml(Arc::new(TypeRegistry::new()))
}

#[test]
fn matching_encoding_decodes_without_mojibake() {
    let codec = xml_codec();
    let latin1 = TextEncoding::for_label("iso-8859-1").unwrap();

    let quote: Quote = codec.deserialize_with(LATIN1_DOCUMENT, Some(latin1)).unwrap();

    assert!(quote.text.contains('\u{ae}'));
    // 'Â' appears only when the wrong encoding is used
    assert!(!quote.text.contains('\u{c2}'));
    // The codec default is untouched by the per-call override
    assert_eq!(codec.default_encoding().name(), "UTF-8");
}

#[test]
fn mismatched_encoding_garbles_by_design() {
    // Document declares iso-8859-1 but the caller claims the text is
    // UTF-8: every non-ASCII character gains a spurious lead byte.
    let codec = xml_codec();

    let quote: Quote = codec.deserialize(LATIN1_DOCUMENT).unwrap();

    assert!(quote.text.contains('\u{c2}'));
}

#[test]
fn latin1_default_encoding_roundtrips_latin1_text() {
    let latin1 = TextEncoding::for_label("iso-8859-1").unwrap();
    let codec = xml_codec().with_default_encoding(latin1);
    let quote = Quote {
        text: "Schr\u{f6}der \u{ae}".into(),
    };

    let text = codec.serialize(&quote).unwrap();
    assert!(text.contains("encoding=\"windows-1252\""));
    let back: Quote = codec.deserialize(&text).unwrap();

    assert_eq!(back, quote);
}

#[test]
fn json_ignores_xml_declarations_and_stays_lossless() {
    let codec = TextCodec::json(Arc::new(TypeRegistry::new()));
    let quote = Quote {
        text: "EURO STOXX 50\u{ae}".into(),
    };

    let text = codec.serialize(&quote).unwrap();
    let back: Quote = codec.deserialize(&text).unwrap();

    assert_eq!(back, quote);
}
