use winnersketch::parser::parse_items;

#[test]
fn json_items_under_response_body() {
    let body = r#"
    {
        "response": {
            "header": {"resultCode": "00"},
            "body": {
                "numOfRows": 2,
                "items": [
                    {
                        "bidNtceNo": "20250100001",
                        "bidNtceNm": "시립미술관 설계공모",
                        "ntceInsttNm": "서울시",
                        "presmptPrce": 400000000,
                        "bidClseDt": "202508101700"
                    },
                    {
                        "bidNtceNo": "20250100002",
                        "bidNtceNm": "도서관 실시설계 용역",
                        "dminsttNm": "부산시",
                        "presmptPrce": "120000000"
                    }
                ]
            }
        }
    }
    "#;

    let records = parse_items(body);
    assert_eq!(records.len(), 2);

    // Bare JSON numbers and numeric strings both land as parseable fees.
    assert_eq!(records[0].int("presmptPrce"), Some(400_000_000));
    assert_eq!(records[1].int("presmptPrce"), Some(120_000_000));
    assert_eq!(records[1].text_any(&["ntceInsttNm", "dminsttNm"]), Some("부산시"));
}

#[test]
fn json_without_items_is_empty() {
    let body = r#"{"response": {"body": {"numOfRows": 0}}}"#;
    assert!(parse_items(body).is_empty());
}

#[test]
fn xml_fallback_flattens_item_children() {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
    <response>
        <header><resultCode>00</resultCode></header>
        <body>
            <items>
                <item>
                    <bidNtceNo>20250100003</bidNtceNo>
                    <bidNtceNm>청사 건축설계 공모</bidNtceNm>
                    <ntceInsttNm>대전시</ntceInsttNm>
                    <presmptPrce>250000000</presmptPrce>
                    <bidNtceDtlUrl/>
                </item>
                <item>
                    <bidNtceNo>20250100004</bidNtceNo>
                    <bidNtceNm>체육관 설계공모</bidNtceNm>
                    <ntceInsttNm>대전시</ntceInsttNm>
                </item>
            </items>
        </body>
    </response>"#;

    let records = parse_items(body);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text("bidNtceNm"), Some("청사 건축설계 공모"));
    assert_eq!(records[0].int("presmptPrce"), Some(250_000_000));
    // Self-closed tags count as present-but-empty, so the fallback chain
    // keeps looking.
    assert_eq!(records[0].text("bidNtceDtlUrl"), None);
}

#[test]
fn unparseable_body_is_an_empty_batch() {
    assert!(parse_items("service temporarily unavailable").is_empty());
    assert!(parse_items("").is_empty());
    assert!(parse_items("<html><body>blocked</body></html>").is_empty());
}
