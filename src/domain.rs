//! Portal domain: the four list kinds, their schemas, and demo data.
//!
//! Each list kind carries its own schema (which columns exist, which are
//! scanned by free-text search) so the generic `ListView` machinery never
//! needs to know one list from another.

use crate::data::records::{FieldDef, FieldValue, Record, RecordSet};

/// The lists the portal exposes, one tab each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Users,
    Traders,
    Plans,
    Subscriptions,
}

impl ListKind {
    pub const ALL: [Self; 4] = [Self::Users, Self::Traders, Self::Plans, Self::Subscriptions];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Traders => "Traders",
            Self::Plans => "Plans",
            Self::Subscriptions => "Subscriptions",
        }
    }

    /// Lowercase name used on the command line and in export file stems.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Traders => "traders",
            Self::Plans => "plans",
            Self::Subscriptions => "subscriptions",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug.to_lowercase())
    }

    /// Column schema for this list. Search scans the marked text columns.
    pub fn schema(self) -> Vec<FieldDef> {
        match self {
            Self::Users => vec![
                FieldDef::text("name").searchable(),
                FieldDef::text("email").searchable(),
                FieldDef::text("role"),
                FieldDef::boolean("active"),
                FieldDef::text("registered"),
            ],
            Self::Traders => vec![
                FieldDef::text("name").searchable(),
                FieldDef::text("district").searchable(),
                FieldDef::text("ruc").searchable(),
                FieldDef::float("rating"),
                FieldDef::integer("branches"),
                FieldDef::boolean("active"),
            ],
            Self::Plans => vec![
                FieldDef::text("name").searchable(),
                FieldDef::text("description").searchable(),
                FieldDef::float("price"),
                FieldDef::integer("duration_days"),
                FieldDef::boolean("active"),
            ],
            Self::Subscriptions => vec![
                FieldDef::text("user").searchable(),
                FieldDef::text("plan").searchable(),
                FieldDef::float("amount"),
                FieldDef::text("status").searchable(),
                FieldDef::text("started"),
            ],
        }
    }

    /// Built-in demo records, used when no export file is supplied.
    pub fn sample(self) -> RecordSet {
        let mut set = RecordSet::new(self.slug(), self.schema());
        let rows: Vec<Vec<FieldValue>> = match self {
            Self::Users => sample_users(),
            Self::Traders => sample_traders(),
            Self::Plans => sample_plans(),
            Self::Subscriptions => sample_subscriptions(),
        };
        for values in rows {
            // Sample rows are hand-written against the schema above.
            let _ = set.add_record(Record::new(values));
        }
        set
    }
}

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

fn sample_users() -> Vec<Vec<FieldValue>> {
    let rows = [
        ("Ana Quispe", "ana.quispe@tcboletin.pe", "admin", true, "2023-04-12"),
        ("Beto Salazar", "beto.salazar@gmail.com", "trader", true, "2023-06-01"),
        ("Carmen Huamán", "chuaman@hotmail.com", "trader", false, "2023-07-19"),
        ("Daniel Paredes", "dparedes@tcboletin.pe", "admin", true, "2023-08-02"),
        ("Elena Vargas", "elena.vargas@yahoo.com", "trader", true, "2023-09-15"),
        ("Fernando Rojas", "frojas@gmail.com", "trader", true, "2023-10-30"),
        ("Gianella Ponce", "gponce@outlook.com", "trader", false, "2024-01-08"),
        ("Hernán Castillo", "hcastillo@gmail.com", "trader", true, "2024-02-14"),
        ("Irma Santos", "irma.santos@tcboletin.pe", "admin", true, "2024-03-21"),
        ("Jorge Mendoza", "jmendoza@gmail.com", "trader", true, "2024-05-05"),
        ("Karina Flores", "kflores@hotmail.com", "trader", true, "2024-06-17"),
        ("Luis Chang", "lchang@yahoo.com", "trader", false, "2024-07-29"),
    ];
    rows.iter()
        .map(|(name, email, role, active, registered)| {
            vec![
                text(name),
                text(email),
                text(role),
                FieldValue::Boolean(*active),
                text(registered),
            ]
        })
        .collect()
}

fn sample_traders() -> Vec<Vec<FieldValue>> {
    let rows: [(&str, &str, &str, Option<f64>, i64, bool); 8] = [
        ("Cambios Lima Centro", "Cercado de Lima", "20154872361", Some(4.6), 3, true),
        ("Miraflores Exchange", "Miraflores", "20498381205", Some(4.8), 2, true),
        ("Dólar Seguro SAC", "San Isidro", "20567120984", Some(4.2), 5, true),
        ("Casa Wilson", "Breña", "20341076528", Some(3.9), 1, true),
        ("InkaCambio", "Surco", "20610458723", None, 1, false),
        ("Cambistas del Norte", "Los Olivos", "20387265410", Some(4.0), 4, true),
        ("El Trébol Money", "San Miguel", "20529813647", Some(3.5), 2, false),
        ("Soles & Dólares EIRL", "La Molina", "20476098132", Some(4.4), 2, true),
    ];
    rows.iter()
        .map(|(name, district, ruc, rating, branches, active)| {
            vec![
                text(name),
                text(district),
                text(ruc),
                rating.map(FieldValue::Float).unwrap_or(FieldValue::Null),
                FieldValue::Integer(*branches),
                FieldValue::Boolean(*active),
            ]
        })
        .collect()
}

fn sample_plans() -> Vec<Vec<FieldValue>> {
    let rows: [(&str, &str, Option<f64>, i64, bool); 5] = [
        ("Básico", "Publicación del tipo de cambio una vez al día", Some(50.0), 30, true),
        ("Pro", "Actualización en tiempo real y destaque en el boletín", Some(10.0), 7, true),
        ("Empresa", "Varias sucursales y reportes mensuales", Some(30.0), 30, true),
        ("Anual Pro", "Plan Pro facturado por año", Some(290.0), 365, true),
        ("Piloto", "Acceso de prueba para nuevas casas de cambio", None, 14, false),
    ];
    rows.iter()
        .map(|(name, description, price, duration, active)| {
            vec![
                text(name),
                text(description),
                price.map(FieldValue::Float).unwrap_or(FieldValue::Null),
                FieldValue::Integer(*duration),
                FieldValue::Boolean(*active),
            ]
        })
        .collect()
}

fn sample_subscriptions() -> Vec<Vec<FieldValue>> {
    let rows = [
        ("Beto Salazar", "Pro", 10.0, "active", "2024-05-02"),
        ("Carmen Huamán", "Básico", 50.0, "expired", "2023-11-20"),
        ("Elena Vargas", "Empresa", 30.0, "active", "2024-04-11"),
        ("Fernando Rojas", "Pro", 10.0, "active", "2024-06-25"),
        ("Hernán Castillo", "Anual Pro", 290.0, "active", "2024-01-30"),
        ("Jorge Mendoza", "Básico", 50.0, "pending", "2024-07-14"),
        ("Karina Flores", "Pro", 10.0, "cancelled", "2024-03-03"),
    ];
    rows.iter()
        .map(|(user, plan, amount, status, started)| {
            vec![
                text(user),
                text(plan),
                FieldValue::Float(*amount),
                text(status),
                text(started),
            ]
        })
        .collect()
}

/// One featured buy/sell quote for the banner carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub trader: String,
    pub buy: f64,
    pub sell: f64,
}

impl RateCard {
    pub fn new(trader: impl Into<String>, buy: f64, sell: f64) -> Self {
        Self {
            trader: trader.into(),
            buy,
            sell,
        }
    }
}

/// Today's featured quotes, in banner order.
pub fn featured_rates() -> Vec<RateCard> {
    vec![
        RateCard::new("Cambios Lima Centro", 3.652, 3.688),
        RateCard::new("Miraflores Exchange", 3.648, 3.692),
        RateCard::new("Dólar Seguro SAC", 3.655, 3.685),
        RateCard::new("Cambistas del Norte", 3.640, 3.695),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in ListKind::ALL {
            assert_eq!(ListKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ListKind::from_slug("PLANS"), Some(ListKind::Plans));
        assert_eq!(ListKind::from_slug("nope"), None);
    }

    #[test]
    fn test_samples_match_their_schemas() {
        for kind in ListKind::ALL {
            let set = kind.sample();
            assert!(!set.is_empty(), "{} sample is empty", kind.slug());
            for record in &set.records {
                assert_eq!(record.len(), set.field_count());
            }
        }
    }

    #[test]
    fn test_users_sample_supports_the_search_walkthrough() {
        use crate::data::list_view::ListView;

        // Twelve users, seven with "an" somewhere in a searchable field,
        // so the demo data exercises a two-page result at page size 5.
        let mut view = ListView::new(ListKind::Users.sample());
        view.set_page_size(5).unwrap();
        view.set_search("an");

        let page = view.page_view();
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows.len(), 5);
    }

    #[test]
    fn test_every_schema_has_a_searchable_column() {
        for kind in ListKind::ALL {
            assert!(
                !kind.sample().searchable_indices().is_empty(),
                "{} has no searchable columns",
                kind.slug()
            );
        }
    }
}
