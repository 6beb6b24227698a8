//! Integration tests for DataSource against a fake list widget.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use sectionlist::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Model and cells
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

fn people() -> Vec<Person> {
    vec![person("Mary", 34), person("John", 41), person("Anne", 29)]
}

#[derive(Default)]
struct PersonCell {
    text: RwLock<String>,
}

impl CellIdentifiable for PersonCell {
    fn reuse_identifier() -> &'static str {
        "PersonCell"
    }

    fn registration_method() -> RegistrationMethod {
        RegistrationMethod::standard::<Self>()
    }
}

impl CellBindable for PersonCell {
    type Model = Person;

    fn bind(&self, model: &Person) {
        *self.text.write() = model.name.clone();
    }
}

/// Instantiated by the host from a named template.
struct BadgeCell {
    template: String,
    text: RwLock<String>,
}

impl CellIdentifiable for BadgeCell {
    fn reuse_identifier() -> &'static str {
        "BadgeCell"
    }

    fn registration_method() -> RegistrationMethod {
        RegistrationMethod::template(CellTemplate::new("Badge").with_bundle("people"))
    }
}

/// Known to the host without registration.
#[derive(Default)]
struct SpacerCell;

impl CellIdentifiable for SpacerCell {
    fn reuse_identifier() -> &'static str {
        "SpacerCell"
    }

    fn registration_method() -> RegistrationMethod {
        RegistrationMethod::None
    }
}

// ============================================================================
// Fake widgets
// ============================================================================

/// What the table saw during one reload.
#[derive(Debug, Clone, PartialEq)]
struct ReloadSnapshot {
    rows: Vec<usize>,
    titles: Vec<Option<String>>,
}

#[derive(Default)]
struct FakeTable {
    registrations: Mutex<HashMap<String, CellRegistration>>,
    pool: Mutex<HashMap<(String, IndexPath), CellHandle>>,
    source: RwLock<Option<Box<dyn TableDataSource + Send + Sync>>>,
    reloads: Mutex<Vec<ReloadSnapshot>>,
}

impl FakeTable {
    fn attach(&self, source: &DataSource<Person>) {
        *self.source.write() = Some(Box::new(source.clone()));
    }

    fn reload_count(&self) -> usize {
        self.reloads.lock().len()
    }

    fn last_reload(&self) -> Option<ReloadSnapshot> {
        self.reloads.lock().last().cloned()
    }

    fn registered(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.registrations.lock().keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    fn instantiate(&self, identifier: &str) -> Option<CellHandle> {
        if identifier == SpacerCell::reuse_identifier() {
            return Some(Arc::new(SpacerCell));
        }

        let registration = self.registrations.lock().get(identifier).cloned()?;
        Some(match registration {
            CellRegistration::Factory(factory) => factory(),
            CellRegistration::Template(template) => Arc::new(BadgeCell {
                template: template.name().to_string(),
                text: RwLock::new(String::new()),
            }),
        })
    }
}

impl TableHost for FakeTable {
    fn register_cell(&self, identifier: &str, registration: CellRegistration) {
        self.registrations
            .lock()
            .insert(identifier.to_string(), registration);
    }

    fn dequeue_cell(&self, identifier: &str, index_path: Option<IndexPath>) -> Option<CellHandle> {
        let Some(index_path) = index_path else {
            return self.instantiate(identifier);
        };

        let key = (identifier.to_string(), index_path);
        if let Some(cell) = self.pool.lock().get(&key) {
            return Some(cell.clone());
        }
        let cell = self.instantiate(identifier)?;
        self.pool.lock().insert(key, cell.clone());
        Some(cell)
    }

    fn reload_data(&self) {
        let source = self.source.read();
        let Some(source) = source.as_ref() else {
            self.reloads.lock().push(ReloadSnapshot {
                rows: Vec::new(),
                titles: Vec::new(),
            });
            return;
        };

        let sections = source.number_of_sections();
        let snapshot = ReloadSnapshot {
            rows: (0..sections).map(|s| source.number_of_rows(s)).collect(),
            titles: (0..sections).map(|s| source.title_for_header(s)).collect(),
        };
        self.reloads.lock().push(snapshot);
    }
}

#[derive(Default)]
struct FakeSearchField {
    delegate: RwLock<Option<Arc<dyn SearchFieldDelegate>>>,
}

impl FakeSearchField {
    fn type_text(&self, text: &str) {
        let delegate = self.delegate.read().clone();
        if let Some(delegate) = delegate {
            delegate.text_did_change(self, text);
        }
    }

    fn click_cancel(&self) {
        let delegate = self.delegate.read().clone();
        if let Some(delegate) = delegate {
            delegate.cancel_button_clicked(self);
        }
    }

    fn may_begin_editing(&self) -> bool {
        let delegate = self.delegate.read().clone();
        delegate.is_none_or(|delegate| delegate.should_begin_editing(self))
    }
}

impl SearchField for FakeSearchField {
    fn delegate(&self) -> Option<Arc<dyn SearchFieldDelegate>> {
        self.delegate.read().clone()
    }

    fn set_delegate(&self, delegate: Option<Arc<dyn SearchFieldDelegate>>) {
        *self.delegate.write() = delegate;
    }
}

/// A delegate the application installed before the list became searchable.
#[derive(Default)]
struct AppDelegate {
    events: Mutex<Vec<String>>,
    allow_editing: bool,
}

impl SearchFieldDelegate for AppDelegate {
    fn text_did_change(&self, _field: &dyn SearchField, text: &str) {
        self.events.lock().push(format!("text:{text}"));
    }

    fn cancel_button_clicked(&self, _field: &dyn SearchField) {
        self.events.lock().push("cancel".to_string());
    }

    fn should_begin_editing(&self, _field: &dyn SearchField) -> bool {
        self.allow_editing
    }
}

fn linked_people() -> (DataSource<Person>, Arc<FakeTable>) {
    init_tracing();
    let table = Arc::new(FakeTable::default());
    let source = DataSource::with_items(None, people());
    source.link::<PersonCell>(table.clone());
    table.attach(&source);
    (source, table)
}

fn cell_text(source: &DataSource<Person>, section: usize, row: usize) -> String {
    let cell = source
        .cell_for_row(IndexPath::new(section, row))
        .downcast::<PersonCell>()
        .expect("person cell");
    let text = cell.text.read().clone();
    text
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_link_registers_and_binds_cells() {
    let (source, table) = linked_people();

    assert!(source.is_linked());
    assert_eq!(table.registered(), vec!["PersonCell".to_string()]);
    assert_eq!(source.number_of_sections(), 1);
    assert_eq!(source.number_of_rows(0), 3);
    assert_eq!(cell_text(&source, 0, 0), "Mary");
    assert_eq!(cell_text(&source, 0, 2), "Anne");
}

#[test]
fn test_cells_are_reused_per_row() {
    let (source, _table) = linked_people();

    let first = source.cell_for_row(IndexPath::new(0, 1));
    let again = source.cell_for_row(IndexPath::new(0, 1));
    let other = source.cell_for_row(IndexPath::new(0, 2));

    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &other));
}

#[test]
fn test_sectioning_reloads_host_once() {
    let (source, table) = linked_people();

    source.section_contents_by(
        |p: &Person| p.name.clone(),
        IndexDisplayMethod::SingleLetter,
        true,
    );

    assert_eq!(table.reload_count(), 1);
    assert_eq!(
        table.last_reload(),
        Some(ReloadSnapshot {
            rows: vec![1, 1, 1],
            titles: vec![Some("A".into()), Some("J".into()), Some("M".into())],
        })
    );
    assert_eq!(
        source.section_index_titles(),
        Some(vec!["A".to_string(), "J".to_string(), "M".to_string()])
    );
    assert_eq!(cell_text(&source, 0, 0), "Anne");
}

#[test]
fn test_update_reloads_once_with_final_state() {
    let (source, table) = linked_people();
    source.section_contents_by(|p: &Person| p.name.clone(), IndexDisplayMethod::Full, false);
    let query = Arc::new(TextQuerySource::new());
    source.make_searchable_by_key(query.clone(), |p: &Person| p.name.clone(), true);
    let before = table.reload_count();

    source.update_items(
        vec![person("Zoe", 22), person("Adam", 50), person("Zoe", 60)],
        Some("ignored".into()),
    );

    assert_eq!(table.reload_count(), before + 1);
    assert_eq!(
        table.last_reload(),
        Some(ReloadSnapshot {
            rows: vec![2, 1],
            titles: vec![Some("Zoe".into()), Some("Adam".into())],
        })
    );
}

#[test]
fn test_search_by_text_query() {
    let (source, table) = linked_people();
    let query = Arc::new(TextQuerySource::new());
    source.make_searchable_by_key(query.clone(), |p: &Person| p.name.clone(), true);

    query.set_query(Some("AN".into()));
    assert!(source.is_searching());
    assert_eq!(
        table.last_reload(),
        Some(ReloadSnapshot {
            rows: vec![1],
            titles: vec![None],
        })
    );
    assert_eq!(cell_text(&source, 0, 0), "Anne");

    query.clear();
    assert!(!source.is_searching());
    assert_eq!(source.number_of_rows(0), 3);
}

#[test]
fn test_custom_predicate_search() {
    let (source, _table) = linked_people();
    let query = Arc::new(TextQuerySource::new());
    source.make_searchable(query.clone(), |p: &Person, q: &str| {
        q.parse::<u32>().is_ok_and(|min| p.age >= min)
    });

    query.set_query(Some("35".into()));
    assert_eq!(source.number_of_rows(0), 1);
    assert_eq!(source.item_at(IndexPath::new(0, 0)).unwrap(), person("John", 41));
}

#[test]
fn test_search_field_keeps_previous_delegate() {
    let (source, table) = linked_people();
    let field = FakeSearchField::default();
    let app = Arc::new(AppDelegate {
        allow_editing: false,
        ..Default::default()
    });
    field.set_delegate(Some(app.clone()));

    let adapter = source.make_searchable_field_by_key(&field, |p: &Person| p.name.clone(), true);
    assert!(adapter.previous_delegate().is_some());

    field.type_text("jo");
    assert_eq!(table.last_reload().map(|r| r.rows), Some(vec![1]));
    assert_eq!(cell_text(&source, 0, 0), "John");

    field.click_cancel();
    assert!(!field.may_begin_editing());
    assert_eq!(*app.events.lock(), vec!["text:jo".to_string(), "cancel".to_string()]);

    field.type_text("");
    assert!(!source.is_searching());
    assert_eq!(source.number_of_rows(0), 3);

    adapter.uninstall(&field);
    field.type_text("zzz");
    assert_eq!(source.number_of_rows(0), 3);
    assert_eq!(app.events.lock().len(), 4);
}

#[test]
fn test_search_field_without_previous_delegate_permits_editing() {
    let (source, _table) = linked_people();
    let field = FakeSearchField::default();

    let adapter = source.make_searchable_field(&field, |p: &Person, q: &str| p.name.starts_with(q));
    assert!(adapter.previous_delegate().is_none());
    assert!(field.may_begin_editing());

    field.type_text("M");
    assert_eq!(source.number_of_rows(0), 1);
    assert_eq!(cell_text(&source, 0, 0), "Mary");
}

#[test]
fn test_search_and_sectioning_combined() {
    let (source, table) = linked_people();
    source.section_contents_by(
        |p: &Person| p.name.clone(),
        IndexDisplayMethod::SingleLetter,
        true,
    );
    let query = Arc::new(TextQuerySource::new());
    source.make_searchable_by_key(query.clone(), |p: &Person| p.name.clone(), true);

    query.set_query(Some("n".into()));
    assert_eq!(
        table.last_reload(),
        Some(ReloadSnapshot {
            rows: vec![1, 1],
            titles: vec![Some("A".into()), Some("J".into())],
        })
    );
    // The index keeps describing the full contents.
    assert_eq!(
        source.section_index_titles(),
        Some(vec!["A".to_string(), "J".to_string(), "M".to_string()])
    );
}

#[test]
fn test_link_cells_with_several_kinds() {
    init_tracing();
    let table = Arc::new(FakeTable::default());
    let source = DataSource::with_items(None, people());

    source.link_cells(
        table.clone(),
        vec![
            CellKind::of::<PersonCell>(),
            CellKind::of::<BadgeCell>(),
            CellKind::of::<SpacerCell>(),
        ],
        |retriever, p: &Person, index_path| {
            if p.age > 40 {
                let badge = retriever.retrieve::<BadgeCell>(Some(index_path));
                *badge.text.write() = format!("{} ({})", p.name, p.age);
                badge as CellHandle
            } else if p.name == "Anne" {
                retriever.retrieve::<SpacerCell>(Some(index_path)) as CellHandle
            } else {
                let cell = retriever.retrieve::<PersonCell>(Some(index_path));
                cell.bind(p);
                cell as CellHandle
            }
        },
    );

    // The spacer is known to the host already and is not registered.
    assert_eq!(
        table.registered(),
        vec!["BadgeCell".to_string(), "PersonCell".to_string()]
    );

    let badge = source
        .cell_for_row(IndexPath::new(0, 1))
        .downcast::<BadgeCell>()
        .expect("badge cell");
    assert_eq!(badge.template, "Badge");
    assert_eq!(*badge.text.read(), "John (41)");

    assert!(source.cell_for_row(IndexPath::new(0, 2)).downcast::<SpacerCell>().is_ok());
    assert!(source.cell_for_row(IndexPath::new(0, 0)).downcast::<PersonCell>().is_ok());
}

#[test]
fn test_link_with_custom_configuration() {
    init_tracing();
    let table = Arc::new(FakeTable::default());
    let source = DataSource::with_items(None, people());
    source.link_with::<PersonCell, _>(table.clone(), |p: &Person, cell: &PersonCell| {
        *cell.text.write() = p.name.to_uppercase();
    });

    assert_eq!(cell_text(&source, 0, 0), "MARY");
}

#[test]
fn test_retriever_reports_misconfiguration() {
    init_tracing();
    let table = Arc::new(FakeTable::default());
    let host: Arc<dyn TableHost> = table.clone();
    let retriever = CellRetriever::new(
        &host,
        vec![CellKind::new("PersonCell", RegistrationMethod::standard::<SpacerCell>())],
    );

    assert!(matches!(
        retriever.try_retrieve::<PersonCell>(None),
        Err(ListSourceError::IncompatibleCell { .. })
    ));
    assert!(matches!(
        retriever.try_retrieve::<BadgeCell>(None),
        Err(ListSourceError::CellNotRegistered { .. })
    ));

    drop(host);
    drop(table);
    assert!(matches!(
        retriever.try_retrieve::<PersonCell>(None),
        Err(ListSourceError::HostReleased)
    ));
}

#[test]
#[should_panic(expected = "call link() first")]
fn test_cell_for_row_before_link_panics() {
    init_tracing();
    let source = DataSource::with_items(None, people());
    let _ = source.cell_for_row(IndexPath::new(0, 0));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_cell_for_row_out_of_range_panics() {
    let (source, _table) = linked_people();
    let _ = source.cell_for_row(IndexPath::new(0, 3));
}

#[test]
fn test_host_is_held_weakly() {
    init_tracing();
    let table = Arc::new(FakeTable::default());
    let source = DataSource::with_items(None, people());
    source.link::<PersonCell>(table.clone());
    assert!(source.host().is_some());

    drop(table);
    assert!(source.host().is_none());
    // Reload requests go nowhere, without failing.
    source.update_items(people(), None);
    assert_eq!(source.number_of_rows(0), 3);
}

#[test]
fn test_load_from_background_thread() {
    let (source, table) = linked_people();
    let before = table.reload_count();

    let fetch = |done: Box<dyn FnOnce(Vec<Person>) + Send>| {
        std::thread::spawn(move || done(vec![person("Eve", 25)]))
            .join()
            .expect("fetch thread");
    };
    source.load(&fetch, Some("Loaded".into()));

    assert_eq!(table.reload_count(), before + 1);
    assert_eq!(source.title_for_header(0).as_deref(), Some("Loaded"));
    assert_eq!(cell_text(&source, 0, 0), "Eve");
}

#[test]
fn test_load_result_after_drop_is_ignored() {
    init_tracing();
    let pending: Arc<Mutex<Option<Box<dyn FnOnce(Vec<Person>) + Send>>>> = Arc::default();
    let updates = Arc::new(AtomicUsize::new(0));

    let source = {
        let updates = updates.clone();
        DataSource::with_update_handler(TableContents::empty(), move |_| {
            updates.fetch_add(1, Ordering::SeqCst);
        })
    };
    let pending_clone = pending.clone();
    let fetch = move |done: Box<dyn FnOnce(Vec<Person>) + Send>| {
        *pending_clone.lock() = Some(done);
    };
    source.load(&fetch, None);
    drop(source);

    let done = pending.lock().take().expect("fetch was requested");
    done(people());
    assert_eq!(updates.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_update_handler_replaces_reload() {
    let (source, table) = linked_people();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
    let seen_clone = seen.clone();
    source.set_update_handler(move |view: &TableContents<Person>| {
        seen_clone.lock().push(view.total_items());
    });

    let extra: Weak<Mutex<Vec<usize>>> = Arc::downgrade(&seen);
    source.signals().contents_updated.connect(move |_| {
        if let Some(seen) = extra.upgrade() {
            seen.lock().push(usize::MAX);
        }
    });

    source.update_items(vec![person("Eve", 25)], None);
    assert_eq!(table.reload_count(), 0);
    let mut seen = seen.lock().clone();
    seen.sort();
    assert_eq!(seen, vec![1, usize::MAX]);
}

#[test]
fn test_config_file_drives_defaults() {
    let (source, _table) = linked_people();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("list.toml");
    std::fs::write(
        &path,
        "[sectioning]\nindex_display = \"full\"\nsort_alphabetically = true\n\n[search]\ncase_insensitive = false\n",
    )
    .expect("write config");

    source.apply_config(&DataSourceConfig::load(&path).expect("load config"));
    source.section_by(|p: &Person| p.name.clone());
    assert_eq!(
        source.section_index_titles(),
        Some(vec!["Anne".to_string(), "John".to_string(), "Mary".to_string()])
    );

    let query = Arc::new(TextQuerySource::with_query("ma"));
    source.search_by(query.clone(), |p: &Person| p.name.clone());
    assert!(source.filtered_contents().is_empty());

    query.set_query(Some("Ma".into()));
    assert_eq!(source.number_of_sections(), 1);
    assert_eq!(source.title_for_header(0).as_deref(), Some("Mary"));
}
