// doc constants
pub const DOC_ID: &str = "_id";
pub const DOC_COLLECTION: &str = "_collection";
pub const RESERVED_FIELDS: [&str; 2] = [DOC_ID, DOC_COLLECTION];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 2;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

// field kind constants
pub const DB_REF_KIND: &str = "DBRef";
pub const DB_REF_CAST_TARGET: &str = "db ref";

// cast constants
/// Wildcard sentinel accepted by cast, meaning "any reference". Casts to an
/// empty field value, same as null.
pub const WILDCARD_REF: &str = "*";
