//! Well-known annotation properties

use oxrdf::NamedNodeRef;

/// Namespace of the FISE enhancement structure
pub const FISE_NS: &str = "http://fise.iks-project.eu/ontology/";

/// `fise:extracted-from`, linking an enhancement to the content item it was computed for
pub const EXTRACTED_FROM: &str = "http://fise.iks-project.eu/ontology/extracted-from";

/// [`EXTRACTED_FROM`] as an RDF node
pub fn extracted_from() -> NamedNodeRef<'static> {
    NamedNodeRef::new_unchecked(EXTRACTED_FROM)
}
