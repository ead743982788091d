//! Diesel table definitions, mirrored by the SQL in `migrations/`.

diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        admin -> Bool,
        slug -> Text,
        created_at -> Timestamptz,
        modified_at -> Timestamptz,
    }
}

diesel::table! {
    bucket_lists (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        description -> Text,
        slug -> Text,
        created_at -> Timestamptz,
        modified_at -> Timestamptz,
    }
}

diesel::joinable!(bucket_lists -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, bucket_lists);
