//! Catalogue of every root operation the API serves
//!
//! Resolvers are ordinary Rust methods whose wire names async-graphql derives
//! from the method name. This table pins the public contract: the exported SDL
//! is checked against it at start-up, so a renamed or dropped resolver stops
//! the server instead of surfacing as a request-time error.

use std::fmt;

use async_graphql::parser::{
    self,
    types::{ServiceDocument, TypeKind, TypeSystemDefinition},
};

/// Root type an operation lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Name of the root type in the exported schema
    pub fn root_type(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "SubscriptionRoot",
        }
    }
}

macro_rules! operations {
    ($($kind:ident { $($variant:ident => $name:literal,)* })*) => {
        /// One root field of the schema
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($($variant,)*)*
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$($(Operation::$variant,)*)*];

            /// Field name on the wire
            pub fn field_name(self) -> &'static str {
                match self {
                    $($(Operation::$variant => $name,)*)*
                }
            }

            pub fn kind(self) -> OperationKind {
                match self {
                    $($(Operation::$variant => OperationKind::$kind,)*)*
                }
            }
        }
    };
}

operations! {
    Query {
        Users => "users",
        Maps => "maps",
        Places => "places",
        Routes => "routes",
        Favorites => "favorites",
        Subscriptions => "subscriptions",
        TrafficData => "trafficData",
        WeatherData => "weatherData",
        Comments => "comments",
        Media => "media",
        NavigationHistory => "navigationHistory",
        MapStyles => "mapStyles",
        Events => "events",
    }
    Mutation {
        CreateUser => "createUser",
        CreateMap => "createMap",
        CreatePlace => "createPlace",
        CreateRoute => "createRoute",
        CreateFavorite => "createFavorite",
        CreateSubscription => "createSubscription",
        CreateTrafficData => "createTrafficData",
        CreateWeatherData => "createWeatherData",
        CreateComment => "createComment",
        CreateMedia => "createMedia",
        CreateNavigationHistory => "createNavigationHistory",
        CreateMapStyle => "createMapStyle",
        CreateEvent => "createEvent",
        UpdateUser => "updateUser",
        UpdateMap => "updateMap",
        UpdatePlace => "updatePlace",
        UpdateRoute => "updateRoute",
        UpdateTrafficData => "updateTrafficData",
        UpdateWeatherData => "updateWeatherData",
        UpdateComment => "updateComment",
        UpdateEvent => "updateEvent",
        DeleteUser => "deleteUser",
        DeleteMap => "deleteMap",
        DeletePlace => "deletePlace",
        DeleteRoute => "deleteRoute",
        DeleteFavorite => "deleteFavorite",
        DeleteSubscription => "deleteSubscription",
        DeleteTrafficData => "deleteTrafficData",
        DeleteWeatherData => "deleteWeatherData",
        DeleteComment => "deleteComment",
        DeleteMedia => "deleteMedia",
        DeleteNavigationHistory => "deleteNavigationHistory",
        DeleteMapStyle => "deleteMapStyle",
        DeleteEvent => "deleteEvent",
    }
    Subscription {
        TrafficUpdated => "trafficUpdated",
        WeatherUpdated => "weatherUpdated",
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind().root_type(), self.field_name())
    }
}

/// Differences between the catalogue and an exported schema
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SchemaMismatch {
    /// Catalogued operations the schema does not serve
    pub missing: Vec<Operation>,
    /// Root fields the schema serves that are not catalogued ("Type.field")
    pub unexpected: Vec<String>,
}

impl SchemaMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self.missing.iter().map(ToString::to_string).collect();
        write!(
            f,
            "missing: [{}], unexpected: [{}]",
            missing.join(", "),
            self.unexpected.join(", ")
        )
    }
}

/// Why an exported schema failed the catalogue check
#[derive(Debug, thiserror::Error)]
pub enum SchemaCheckError {
    #[error("exported SDL does not parse: {0}")]
    Parse(#[from] parser::Error),

    #[error("schema does not match the operation table: {0}")]
    Mismatch(SchemaMismatch),
}

/// Field names declared on the object type `type_name`
pub fn root_fields(doc: &ServiceDocument, type_name: &str) -> Vec<String> {
    doc.definitions
        .iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Type(ty) if ty.node.name.node.as_str() == type_name => {
                match &ty.node.kind {
                    TypeKind::Object(object) => Some(&object.fields),
                    _ => None,
                }
            }
            _ => None,
        })
        .flatten()
        .map(|field| field.node.name.node.to_string())
        .collect()
}

/// Compare an exported SDL document with [`Operation::ALL`]
pub fn check_schema(sdl: &str) -> Result<SchemaMismatch, parser::Error> {
    let doc = parser::parse_schema(sdl)?;
    let mut mismatch = SchemaMismatch::default();

    for kind in [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ] {
        let served = root_fields(&doc, kind.root_type());

        mismatch.missing.extend(
            Operation::ALL
                .iter()
                .filter(|op| op.kind() == kind)
                .filter(|op| !served.iter().any(|field| field == op.field_name())),
        );
        mismatch.unexpected.extend(
            served
                .iter()
                .filter(|field| {
                    !Operation::ALL
                        .iter()
                        .any(|op| op.kind() == kind && op.field_name() == field.as_str())
                })
                .map(|field| format!("{}.{}", kind.root_type(), field)),
        );
    }

    Ok(mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalogue_counts() {
        let count = |kind| Operation::ALL.iter().filter(|op| op.kind() == kind).count();
        assert_eq!(count(OperationKind::Query), 13);
        assert_eq!(count(OperationKind::Mutation), 34);
        assert_eq!(count(OperationKind::Subscription), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::CreateMap.to_string(), "Mutation.createMap");
        assert_eq!(
            Operation::TrafficUpdated.to_string(),
            "SubscriptionRoot.trafficUpdated"
        );
    }

    #[test]
    fn test_root_fields_skip_descriptions_and_arguments() {
        let sdl = r#"
type Map {
	id: ID!
}

type Query {
	"""
	All users
	"""
	users: [User!]
	maps: [Map!]
}

type Mutation {
	createMap(
		name: String!,
		type: String!
	): Map!
	deleteMap(id: ID!): Map!
}
"#;
        let doc = parser::parse_schema(sdl).unwrap();
        assert_eq!(root_fields(&doc, "Query"), vec!["users", "maps"]);
        assert_eq!(root_fields(&doc, "Mutation"), vec!["createMap", "deleteMap"]);
        assert_eq!(root_fields(&doc, "Map"), vec!["id"]);
        assert!(root_fields(&doc, "SubscriptionRoot").is_empty());
    }

    #[test]
    fn test_check_schema_reports_both_directions() {
        let sdl = "type Query {\n\tusers: [User!]\n\tlegacy: String\n}\n";
        let mismatch = check_schema(sdl).unwrap();

        assert!(!mismatch.is_empty());
        assert!(!mismatch.missing.contains(&Operation::Users));
        assert!(mismatch.missing.contains(&Operation::Maps));
        assert!(mismatch.missing.contains(&Operation::WeatherUpdated));
        assert_eq!(mismatch.unexpected, vec!["Query.legacy".to_string()]);
    }

    #[test]
    fn test_unparseable_sdl_is_an_error() {
        assert!(check_schema("type Query {\n\tusers: [User!]\n").is_err());
    }
}
