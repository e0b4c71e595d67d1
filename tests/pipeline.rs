// End-to-end parsing of SDS text through an injected acquisition chain
use chrono::NaiveDate;
use rstest::{fixture, rstest};

use sds_parser::pdf_extraction::{ExtractionMethod, TextAcquirer, TextStrategy};
use sds_parser::{ParsedDocument, ParserConfig, SdsParser};

const HAND_RUB: &str = "\
SAFETY DATA SHEET
SECTION 1: Identification of the substance/mixture and of the company/undertaking
Product name: Hand Rub Gel 70%
Recommended use: Antiseptic hand rub
Supplier: Acme Chemicals Pty Ltd
Address: 12 Main Street, Sydney NSW 2000
Emergency telephone: 1800 555 123
SECTION 2: Hazards identification
Classification of the hazardous chemical
Flammable liquids Category 2
Signal word: Danger
Hazard statements
H225 Highly flammable liquid and vapour.
H319 Causes serious eye irritation.
Precautionary statements
P210 Keep away from heat, hot surfaces, sparks, open flames and other ignition sources. No smoking.
P305+P351+P338 IF IN EYES: Rinse cautiously with water for several minutes.
SECTION 3: Composition and information on ingredients
Ethanol 64-17-5 60-70%
Isopropanol 67-63-0 1-10%
Water 7732-18-5 to 100%
SECTION 14: Transport information
UN number: 1170
Proper shipping name: ETHANOL SOLUTION
Transport hazard class: 3
Packing group: II
SECTION 16: Other information
Date of issue: 13/04/2023
SDS prepared by: Acme Chemicals Pty Ltd
";

const SURFACE_WIPE: &str = "\
1. Identification
Product identifier
Surface Wipe Refill
Product use:
 Hard surface cleaning
2. Hazards identification
This mixture does not meet the criteria for classification.
14. Transport information
Not regulated as dangerous goods for transport by road or rail.
16. Other information
Date of issue / Date of
13/04/2023 revision.
";

const DEGREASER: &str = "\
1. Identification
Product name: Citrus Degreaser
2. Hazards identification
Not classified as hazardous.
3. Composition and information on ingredients
Ingredient CAS Proportion
2-Propanol 67-63-0 10-30%
2-Butoxyethanol 111-76-2 1-5%
Water 7732-18-5 to 100%
14. Transport information
Not regulated as dangerous goods.
";

struct Canned(&'static str);

impl TextStrategy for Canned {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PdfToText
    }

    fn extract(&self, _bytes: &[u8]) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

#[fixture]
fn config() -> ParserConfig {
    ParserConfig::default().with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

fn parser_for(config: &ParserConfig, text: &'static str) -> SdsParser {
    let acquirer = TextAcquirer::with_strategies(config, vec![Box::new(Canned(text))]);
    SdsParser::with_acquirer(config.clone(), acquirer)
}

#[rstest]
fn test_hazardous_dangerous_good(config: ParserConfig) {
    let doc = parser_for(&config, HAND_RUB).parse_bytes(b"%PDF-1.4", 1001);

    assert_eq!(doc.product_id, 1001);
    assert_eq!(doc.vendor.as_deref(), Some("Acme Chemicals Pty Ltd"));
    assert_eq!(doc.product_name.as_deref(), Some("Hand Rub Gel 70%"));
    assert_eq!(doc.product_use.as_deref(), Some("Antiseptic hand rub"));
    assert_eq!(doc.issue_date.as_deref(), Some("2023-04-13"));

    assert_eq!(doc.hazardous_substance, Some(true));
    assert_eq!(doc.hazardous_confidence, 0.9);
    assert_eq!(
        doc.hazard_statements,
        vec![
            "H225 Highly flammable liquid and vapour.",
            "H319 Causes serious eye irritation."
        ]
    );
    assert_eq!(doc.signal_word.as_deref(), Some("Danger"));
    assert_eq!(doc.precautionary_statements.len(), 2);
    assert!(doc.precautionary_statements[1].starts_with("P305+P351+P338 IF IN EYES"));

    assert!(doc.dangerous_good);
    assert_eq!(doc.dangerous_goods_confidence, 1.0);
    assert_eq!(doc.un_number.as_deref(), Some("1170"));
    assert_eq!(doc.dangerous_goods_class.as_deref(), Some("3"));
    assert_eq!(doc.packing_group.as_deref(), Some("II"));
    assert_eq!(doc.subsidiary_risks, None);
    assert_eq!(doc.proper_shipping_name.as_deref(), Some("ETHANOL SOLUTION"));

    assert_eq!(doc.cas_numbers, vec!["64-17-5", "67-63-0", "7732-18-5"]);

    let s14 = doc.section_14_excerpt.as_deref().unwrap();
    assert!(s14.starts_with("Transport information UN number: 1170"));
    assert!(!s14.contains("Other information"));
    assert!(doc.section_16_excerpt.as_deref().unwrap().contains("13/04/2023"));
}

#[rstest]
fn test_non_hazardous_not_regulated(config: ParserConfig) {
    let doc = parser_for(&config, SURFACE_WIPE).parse_bytes(b"%PDF-1.4", 7);

    assert_eq!(doc.product_name.as_deref(), Some("Surface Wipe Refill"));
    assert_eq!(doc.product_use.as_deref(), Some("Hard surface cleaning"));
    assert_eq!(doc.issue_date.as_deref(), Some("2023-04-13"));

    assert_eq!(doc.hazardous_substance, Some(false));
    assert_eq!(doc.hazardous_confidence, 1.0);
    assert_eq!(doc.hazard_statements, vec!["No classification"]);

    assert!(!doc.dangerous_good);
    assert_eq!(doc.dangerous_goods_confidence, 1.0);
    assert_eq!(doc.un_number, None);
    assert_eq!(doc.dangerous_goods_class, None);
    assert_eq!(doc.packing_group, None);

    assert_eq!(doc.vendor, None);
    assert!(doc.cas_numbers.is_empty());
}

#[rstest]
fn test_ingredient_names_stay_in_composition(config: ParserConfig) {
    let doc = parser_for(&config, DEGREASER).parse_bytes(b"%PDF-1.4", 12);

    assert_eq!(doc.product_name.as_deref(), Some("Citrus Degreaser"));
    assert_eq!(doc.hazardous_substance, Some(false));
    assert_eq!(doc.hazardous_confidence, 1.0);
    assert_eq!(doc.hazard_statements, vec!["No classification"]);
    assert_eq!(doc.cas_numbers, vec!["67-63-0", "111-76-2", "7732-18-5"]);
    assert!(!doc.dangerous_good);
}

#[rstest]
fn test_textless_document(config: ParserConfig) {
    let doc = parser_for(&config, "").parse_bytes(b"%PDF-1.4", 3);
    assert_eq!(doc, ParsedDocument::empty(3));
    assert_eq!(doc.hazardous_substance, None);
    assert!(!doc.dangerous_good);
}

#[rstest]
#[case(HAND_RUB)]
#[case(SURFACE_WIPE)]
#[case("")]
#[case("random words with no structure at all")]
fn test_parsing_is_idempotent_and_bounded(config: ParserConfig, #[case] text: &'static str) {
    let parser = parser_for(&config, text);
    let first = parser.parse_bytes(b"%PDF", 11);
    let second = parser.parse_bytes(b"%PDF", 11);

    assert_eq!(first, second);
    assert!((0.0..=1.0).contains(&first.hazardous_confidence));
    assert!((0.0..=1.0).contains(&first.dangerous_goods_confidence));
}

#[rstest]
fn test_json_output_round_trips(config: ParserConfig) {
    let doc = parser_for(&config, HAND_RUB).parse_bytes(b"%PDF", 5);
    let json = doc.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["un_number"], "1170");
    assert_eq!(value["hazardous_substance"], true);

    assert_eq!(ParsedDocument::from_json(&json).unwrap(), doc);
}

#[rstest]
fn test_parser_is_shareable_across_threads(config: ParserConfig) {
    let parser = parser_for(&config, HAND_RUB);
    let expected = parser.parse_bytes(b"%PDF", 1);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| parser.parse_bytes(b"%PDF", 1)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[rstest]
fn test_far_future_revision_is_ignored(config: ParserConfig) {
    // Reference date 2024-01-01; 2024-05-01 is 121 days out.
    let text = "SECTION 16: Other information\nRevision Date: 01/05/2024\nDate Prepared: 10/10/2023\n";
    let doc = parser_for(&config, "").parse_text(text, 1);
    assert_eq!(doc.issue_date.as_deref(), Some("2023-10-10"));
}
