mod association;
mod employee;
mod project;

pub use association::{AssociationRef, IdRef};
pub use employee::{Employee, EmployeePayload};
pub use project::{Project, ProjectPayload};

/// Anything the pages list and pick by id and name.
pub trait Record {
    fn id(&self) -> i64;
    fn nome(&self) -> &str;
}

/// Names of the records whose ids are in `ids`, in the order of `records`.
pub fn names_for_ids<'a, R: Record>(records: &'a [R], ids: &[i64]) -> Vec<&'a str> {
    records
        .iter()
        .filter(|record| ids.contains(&record.id()))
        .map(Record::nome)
        .collect()
}
