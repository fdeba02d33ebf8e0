// Tables of the database cache backend, one per item type.
// Both hold the JSON text of a record keyed by its positive id.

diesel::table! {
    status_data (status_id) {
        status_id -> BigInt,
        json_data -> Text,
    }
}

diesel::table! {
    user_data (user_id) {
        user_id -> BigInt,
        json_data -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(status_data, user_data);

pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS status_data (
    status_id BIGINT PRIMARY KEY NOT NULL CHECK (status_id > 0),
    json_data TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS user_data (
    user_id BIGINT PRIMARY KEY NOT NULL CHECK (user_id > 0),
    json_data TEXT NOT NULL
);
";
