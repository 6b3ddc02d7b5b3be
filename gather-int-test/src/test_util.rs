use gather::collect;
use gather::Collection;

#[ctor::ctor]
fn init_logging() {
    colog::init();
}

/// The three-account fixture used across the scenario tests.
pub fn accounts() -> Collection {
    collect![
        { account_id: "account-x15", price: "50" },
        { account_id: "account-x11", price: "50" },
        { account_id: "account-x5411", price: "40" },
    ]
}

/// A nested catalog with sequences inside mappings inside sequences,
/// exercising mixed-type path resolution.
pub fn catalog() -> Collection {
    collect! {
        store: {
            name: "corner shop",
            departments: [
                {
                    name: "produce",
                    products: [
                        { sku: "apple", stock: 12 },
                        { sku: "pear", stock: 4 },
                    ],
                },
                {
                    name: "bakery",
                    products: [
                        { sku: "rye", stock: 7 },
                    ],
                },
            ],
        },
    }
}
