diesel::table! {
    bookings (id) {
        id -> Uuid,
        venue -> Text,
        date -> Date,
        start_minutes -> Int4,
        end_minutes -> Int4,
        booker_name -> Text,
        purpose -> Text,
        status -> Text,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}
