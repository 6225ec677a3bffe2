// Reference corpus management — the dataset directory scanned per query.

pub mod store;
