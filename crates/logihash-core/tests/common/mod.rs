use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use logihash_core::{
    ChangeCallback, HashEngine, LastHashRecord, LogicalHash, LogicalType, SaltRegistry, Value,
};

/// Engine over a pinned salt table so expected digests can be computed by hand
#[allow(dead_code)]
pub fn engine_with_salts(salts: Vec<i32>) -> HashEngine {
    HashEngine::with_registry(Arc::new(SaltRegistry::from_salts(salts).unwrap()))
}

/// Two integer coordinates, mutable through `Cell`s
#[allow(dead_code)]
pub struct Point {
    pub ty: Arc<LogicalType>,
    pub x: Cell<i32>,
    pub y: Cell<i32>,
    pub last: LastHashRecord,
}

#[allow(dead_code)]
impl Point {
    pub fn new(ty: &Arc<LogicalType>, x: i32, y: i32) -> Self {
        Self {
            ty: ty.clone(),
            x: Cell::new(x),
            y: Cell::new(y),
            last: LastHashRecord::new(),
        }
    }
}

impl LogicalHash for Point {
    fn logical_type(&self) -> &LogicalType {
        &self.ty
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        match name {
            "x" => sink(Value::scalar(&self.x.get())),
            "y" => sink(Value::scalar(&self.y.get())),
            _ => {}
        }
    }

    fn last_hash(&self) -> Option<&LastHashRecord> {
        Some(&self.last)
    }
}

/// Singly linked node whose `next` may point anywhere, including back to itself
#[allow(dead_code)]
pub struct Link {
    pub ty: Arc<LogicalType>,
    pub label: RefCell<Option<String>>,
    pub next: RefCell<Option<Rc<Link>>>,
    pub last: LastHashRecord,
}

#[allow(dead_code)]
impl Link {
    pub fn new(ty: &Arc<LogicalType>, label: &str) -> Rc<Self> {
        Rc::new(Self {
            ty: ty.clone(),
            label: RefCell::new(Some(label.to_string())),
            next: RefCell::new(None),
            last: LastHashRecord::new(),
        })
    }

    pub fn point_to(&self, next: &Rc<Link>) {
        *self.next.borrow_mut() = Some(next.clone());
    }

    /// Break the cycle so the `Rc`s can be freed
    pub fn unlink(&self) {
        self.next.borrow_mut().take();
    }
}

impl LogicalHash for Link {
    fn logical_type(&self) -> &LogicalType {
        &self.ty
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        match name {
            "label" => sink(Value::optional_scalar(self.label.borrow().as_ref())),
            "next" => sink(Value::optional_node(self.next.borrow().as_deref())),
            _ => {}
        }
    }

    fn last_hash(&self) -> Option<&LastHashRecord> {
        Some(&self.last)
    }
}

/// Holds two arbitrary nodes
#[allow(dead_code)]
pub struct Pair<'a> {
    pub ty: Arc<LogicalType>,
    pub first: Option<&'a dyn LogicalHash>,
    pub second: Option<&'a dyn LogicalHash>,
    pub last: LastHashRecord,
}

impl LogicalHash for Pair<'_> {
    fn logical_type(&self) -> &LogicalType {
        &self.ty
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        let slot = match name {
            "first" => self.first,
            "second" => self.second,
            _ => return,
        };
        sink(slot.map_or(Value::Null, Value::Node));
    }

    fn last_hash(&self) -> Option<&LastHashRecord> {
        Some(&self.last)
    }
}

/// Node that exposes string properties from a table
#[allow(dead_code)]
pub struct Record {
    pub ty: Arc<LogicalType>,
    pub fields: Vec<(&'static str, Option<&'static str>)>,
}

impl LogicalHash for Record {
    fn logical_type(&self) -> &LogicalType {
        &self.ty
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        if let Some((_, value)) = self.fields.iter().find(|(field, _)| *field == name) {
            sink(Value::optional_scalar(value.as_ref()));
        }
    }
}

/// Change callback that remembers every invocation
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingCallback {
    calls: Mutex<Vec<(String, i32, i32)>>,
}

#[allow(dead_code)]
impl RecordingCallback {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, i32, i32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChangeCallback for RecordingCallback {
    fn hash_changed(&self, subject: &dyn LogicalHash, old_hash: i32, new_hash: i32) {
        self.calls.lock().unwrap().push((
            subject.logical_type().name().to_string(),
            old_hash,
            new_hash,
        ));
    }
}
