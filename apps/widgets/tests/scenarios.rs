use intake_widgets::dom::memory::MemoryDom;
use intake_widgets::dom::{Dom, FileMeta, NodeId};
use intake_widgets::page::COPIED_LABEL;
use intake_widgets::{
    AcceptancePolicy, FileUploadHandler, IndexPage, MultiFieldValidator, PageConfig, Selection,
    UploadConfig, ValidatorConfig,
};

const MB: u64 = 1_000_000;
const MIB: u64 = 1024 * 1024;

struct UploadPage {
    dom: MemoryDom,
    customer: NodeId,
    input: NodeId,
    drop_area: NodeId,
    file_info: NodeId,
    file_name: NodeId,
    submit: NodeId,
    loading: NodeId,
    results: NodeId,
    table: NodeId,
    copy: NodeId,
}

fn upload_page() -> UploadPage {
    let mut dom = MemoryDom::new();
    dom.insert("form", &[("id", "uploadForm")]);
    let customer = dom.insert("select", &[("id", "customerSelect")]);
    let input = dom.insert("input", &[("id", "pdfFile"), ("type", "file")]);
    let drop_area = dom.insert("div", &[("id", "dropArea"), ("class", "drop-area")]);
    let file_info = dom.insert("div", &[("id", "fileInfo"), ("style", "display: none")]);
    let file_name = dom.insert("span", &[("id", "fileName")]);
    let submit = dom.insert("button", &[("id", "submitBtn"), ("disabled", "")]);
    let loading = dom.insert("div", &[("id", "loading"), ("style", "display:none")]);
    let results = dom.insert("div", &[("id", "results")]);
    let table = dom.insert("table", &[("id", "resultsTable")]);
    let copy = dom.insert("button", &[("id", "copyBtn")]);
    dom.set_text(copy, "Copy to clipboard");
    UploadPage {
        dom,
        customer,
        input,
        drop_area,
        file_info,
        file_name,
        submit,
        loading,
        results,
        table,
        copy,
    }
}

#[test]
fn validator_enables_submit_once_name_is_typed() {
    let mut dom = MemoryDom::new();
    dom.insert("form", &[("id", "form")]);
    let name = dom.insert("input", &[("id", "name"), ("type", "text")]);
    let customer = dom.insert("select", &[("id", "customerSelect"), ("value", "metro")]);
    let submit = dom.insert("button", &[("id", "submit")]);

    let validator = MultiFieldValidator::bind(
        &mut dom,
        &ValidatorConfig::new("#form", ["#name", "#customerSelect"], "#submit"),
    )
    .expect("validator binds");
    assert!(dom.is_disabled(submit));

    dom.type_text(name, "Acme");
    assert!(!dom.is_disabled(submit));
    assert!(validator.is_valid());

    // One field going invalid closes the gate immediately.
    dom.choose_option(customer, "");
    assert!(dom.is_disabled(submit));
    dom.choose_option(customer, "sysco");
    assert!(!dom.is_disabled(submit));
}

#[test]
fn dropped_pdf_is_treated_like_a_chosen_one() {
    let mut page = upload_page();
    IndexPage::mount(&mut page.dom, &PageConfig::default());

    let report = FileMeta::new("REPORT.PDF", 10 * MB);
    page.dom.drop_files(page.drop_area, vec![report.clone()]);

    assert!(page.dom.alerts().is_empty());
    assert!(page.dom.is_displayed(page.file_info));
    assert_eq!(page.dom.text(page.file_name), "REPORT.PDF");
    assert_eq!(page.dom.files(page.input), vec![report]);
}

#[test]
fn oversized_file_is_rejected_whatever_its_extension() {
    for name in ["big.pdf", "big.PDF", "big.zip"] {
        let mut page = upload_page();
        let handler = FileUploadHandler::bind(
            &mut page.dom,
            &UploadConfig::default(),
            AcceptancePolicy::pdf(),
            None,
        )
        .unwrap();
        page.dom
            .choose_files(page.input, vec![FileMeta::new(name, 16 * MIB + 1)]);

        assert_eq!(page.dom.alerts().len(), 1, "{name}");
        assert!(page.dom.files(page.input).is_empty(), "{name}");
        assert!(page.dom.is_disabled(page.submit), "{name}");
        assert!(!page.dom.is_displayed(page.file_info), "{name}");
        assert_eq!(handler.process_selection(&mut page.dom), Selection::Empty);
    }
}

#[test]
fn excel_handler_rejects_non_excel_files() {
    let mut page = upload_page();
    FileUploadHandler::bind(
        &mut page.dom,
        &UploadConfig::default(),
        AcceptancePolicy::Excel,
        None,
    )
    .unwrap();

    page.dom
        .choose_files(page.input, vec![FileMeta::new("prices.csv", 100)]);
    assert_eq!(
        page.dom.alerts(),
        ["Please select an Excel file (.xls or .xlsx)."]
    );
    assert!(page.dom.files(page.input).is_empty());

    page.dom
        .choose_files(page.input, vec![FileMeta::new("prices.XLS", 100)]);
    assert_eq!(page.dom.alerts().len(), 1);
    assert_eq!(page.dom.text(page.file_name), "prices.XLS");
}

#[test]
fn reprocessing_an_accepted_file_changes_nothing() {
    let mut page = upload_page();
    let handler = FileUploadHandler::bind(
        &mut page.dom,
        &UploadConfig::default(),
        AcceptancePolicy::pdf(),
        None,
    )
    .unwrap();
    page.dom
        .choose_files(page.input, vec![FileMeta::new("po.pdf", 42)]);

    let first = handler.process_selection(&mut page.dom);
    let snapshot = (
        page.dom.text(page.file_name),
        page.dom.is_displayed(page.file_info),
        page.dom.is_disabled(page.submit),
        page.dom.files(page.input),
    );
    let second = handler.process_selection(&mut page.dom);

    assert_eq!(first, second);
    assert_eq!(
        snapshot,
        (
            page.dom.text(page.file_name),
            page.dom.is_displayed(page.file_info),
            page.dom.is_disabled(page.submit),
            page.dom.files(page.input),
        )
    );
}

#[test]
fn copying_an_empty_table_alerts_without_writing() {
    let mut page = upload_page();
    IndexPage::mount(&mut page.dom, &PageConfig::default());

    page.dom.click(page.copy);

    assert_eq!(page.dom.alerts(), ["No data to copy"]);
    assert_eq!(page.dom.clipboard_writes(), 0);
}

#[test]
fn full_upload_flow() {
    let mut page = upload_page();
    let mounted = IndexPage::mount(&mut page.dom, &PageConfig::default());
    assert!(mounted.upload.is_some());

    page.dom.choose_option(page.customer, "metro");
    assert!(page.dom.is_disabled(page.submit));
    page.dom
        .choose_files(page.input, vec![FileMeta::new("order-118.pdf", 3 * MB)]);
    assert!(!page.dom.is_disabled(page.submit));

    let submitted = page.dom.submit(
        page.dom
            .element_by_id("uploadForm")
            .expect("form present"),
    );
    assert!(!submitted.is_default_prevented());
    assert!(page.dom.is_displayed(page.loading));
    assert!(!page.dom.is_displayed(page.results));

    page.dom.set_rows(
        page.table,
        vec![
            vec!["SKU".into(), "Description".into(), "Qty".into()],
            vec!["10442".into(), "Tomatoes 6kg".into(), "4".into()],
        ],
    );
    page.dom.click(page.copy);
    assert!(page.dom.settle_clipboard(Ok(())));
    assert_eq!(
        page.dom.clipboard(),
        Some("SKU\tDescription\tQty\n10442\tTomatoes 6kg\t4")
    );
    assert_eq!(page.dom.text(page.copy), COPIED_LABEL);
    page.dom.advance(2000);
    assert_eq!(page.dom.text(page.copy), "Copy to clipboard");
}
