use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    PageTree,
    ResourceDict,
    Page(usize),
    ContentForPage(usize),
}

/// Hands out consecutive object numbers and remembers which object each went to
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    last_id: i32,
}

impl ObjectReferences {
    /// Allocate numbers following `last`, the highest object number already in use.
    /// The caller checks that `last` is not negative and leaves room for every
    /// number it will allocate.
    pub fn starting_after(last: i32) -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            last_id: last,
        }
    }

    fn new_id(&mut self) -> Ref {
        self.last_id += 1;
        Ref::new(self.last_id)
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.new_id();
        self.refs.insert(ref_type, id);
        id
    }

    /// The highest object number handed out so far
    pub fn last(&self) -> i32 {
        self.last_id
    }
}
