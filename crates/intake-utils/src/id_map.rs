use std::hash::Hash;

pub trait ItemId {
    type IdType;

    fn id(&self) -> Self::IdType;
}

/// Serde adapter for maps that are written as plain lists in config files.
/// The map key is taken from each element's [`ItemId`], declaration order is
/// preserved by the collecting map type, and duplicate ids are a hard
/// deserialization error.
#[allow(clippy::module_inception)]
pub mod id_map {
    use super::ItemId;
    use serde::Serialize;
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::Serializer;
    use std::collections::HashSet;
    use std::fmt::Display;
    use std::hash::Hash;

    pub fn serialize<'a, S, T: ItemId + Serialize + 'a, I: IntoIterator<Item = (&'a T::IdType, &'a T)>>(
        map: I,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let iter = map.into_iter();
        serializer.collect_seq(iter.map(|(_, v)| v))
    }

    pub fn deserialize<'de, D, T, O>(deserializer: D) -> Result<O, D::Error>
    where
        D: Deserializer<'de>,
        T: ItemId + Deserialize<'de>,
        T::IdType: Eq + Hash + Clone + Display,
        O: FromIterator<(T::IdType, T)>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        let mut seen = HashSet::with_capacity(elements.len());
        for element in &elements {
            let id = element.id();
            if !seen.insert(id.clone()) {
                return Err(serde::de::Error::custom(format!("duplicate id: {id}")));
            }
        }
        Ok(elements.into_iter().map(|v| (v.id(), v)).collect())
    }
}

/// Read-only lookup shared by config maps that need both keyed access and
/// stable iteration order.
pub trait IdKeyed<T: ItemId> {
    fn item(&self, id: &T::IdType) -> Option<&T>;
}

impl<T> IdKeyed<T> for indexmap::IndexMap<T::IdType, T>
where
    T: ItemId,
    T::IdType: Eq + Hash,
{
    fn item(&self, id: &T::IdType) -> Option<&T> {
        self.get(id)
    }
}
