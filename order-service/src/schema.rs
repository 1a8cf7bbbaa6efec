diesel::table! {
    orders (id) {
        id -> Varchar,
        customer_id -> Varchar,
        product_id -> Varchar,
        quantity -> Int4,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    order_items (order_id, position) {
        order_id -> Varchar,
        position -> Int4,
        product_id -> Varchar,
        quantity -> Int4,
        unit_price -> Numeric,
    }
}

diesel::joinable!(order_items -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    orders,
    order_items,
);
