diesel::table! {
    inventory (product_id) {
        product_id -> Varchar,
        available_quantity -> Int4,
        reserved_quantity -> Int4,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}
