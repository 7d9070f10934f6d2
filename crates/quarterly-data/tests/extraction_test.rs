//! Integration tests for statement extraction and table building

use quarterly_data::dart::{ExtractedPeriod, LineItem};
use quarterly_data::{Account, FiscalPeriod, PeriodTableBuilder, Quarter, fiscal_periods};

const RESPONSE_LIST: &str = r#"[
    {"fs_div": "CFS", "sj_div": "BS", "account_nm": "자산총계", "thstrm_amount": "448,424,507,000,000"},
    {"fs_div": "CFS", "sj_div": "BS", "account_nm": "부채총계", "thstrm_amount": "92,228,115,000,000"},
    {"fs_div": "CFS", "sj_div": "BS", "account_nm": "자본총계", "thstrm_amount": "356,196,392,000,000"},
    {"fs_div": "CFS", "sj_div": "IS", "account_nm": "매출액", "thstrm_amount": "74,068,302,000,000"},
    {"fs_div": "CFS", "sj_div": "IS", "account_nm": "영업이익", "thstrm_amount": "6,606,060,000,000"},
    {"fs_div": "CFS", "sj_div": "IS", "account_nm": "당기순이익", "thstrm_amount": "6,754,716,000,000"},
    {"fs_div": "OFS", "sj_div": "IS", "account_nm": "매출액", "thstrm_amount": "55,000,000,000,000"},
    {"fs_div": "OFS", "sj_div": "IS", "account_nm": "당기순이익", "thstrm_amount": "-"}
]"#;

#[test]
fn test_full_response_to_record() {
    let items: Vec<LineItem> = serde_json::from_str(RESPONSE_LIST).unwrap();
    let period = FiscalPeriod::new(2024, Quarter::Q1);

    let extracted = ExtractedPeriod::from_line_items(period, &items);
    assert_eq!(extracted.amounts.len(), Account::ALL.len());

    let mut builder = PeriodTableBuilder::new("삼성전자", "00126380");
    assert!(builder.push(&extracted));
    let table = builder.build();

    let figures = table[0].figures();
    assert_eq!(figures.total_assets, Some(448_424_507_000_000.0));
    assert_eq!(figures.total_liabilities, Some(92_228_115_000_000.0));
    assert_eq!(figures.total_equity, Some(356_196_392_000_000.0));
    assert_eq!(figures.revenue, Some(74_068_302_000_000.0));
    assert_eq!(figures.operating_income, Some(6_606_060_000_000.0));
    assert_eq!(figures.net_income, Some(6_754_716_000_000.0));
    assert!(table[0].is_actual());
}

#[test]
fn test_standalone_only_response_leaves_accounts_missing() {
    let items = vec![
        LineItem::new("OFS", "매출액", "100"),
        LineItem::new("OFS", "영업이익", "10"),
    ];
    let period = FiscalPeriod::new(2024, Quarter::Q3);

    let mut builder = PeriodTableBuilder::new("Acme", "00000001");
    builder.push(&ExtractedPeriod::from_line_items(period, &items));
    let table = builder.build();

    assert_eq!(table.len(), 1);
    assert!(table[0].figures().is_empty());
}

#[test]
fn test_skipped_periods_keep_chronology() {
    let mut builder = PeriodTableBuilder::new("Acme", "00000001");

    // Every third period "fails" and is never pushed.
    for (i, period) in fiscal_periods(2021, 2023).enumerate() {
        if i % 3 == 2 {
            continue;
        }
        let items = vec![LineItem::new("CFS", "매출액", format!("{}", (i + 1) * 100))];
        builder.push(&ExtractedPeriod::from_line_items(period, &items));
    }

    let table = builder.build();
    assert_eq!(table.len(), 8);
    assert!(table.windows(2).all(|w| w[0].period() < w[1].period()));
    assert_eq!(table[0].figures().revenue, Some(100.0));
}
