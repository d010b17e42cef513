use models::{Draft, DraftData};

use crate::errors::ServiceError;

/// Storage key of an owner's collection: the decimal owner id.
pub fn owner_key(id: i64) -> String {
    id.to_string()
}

/// Ordered drafts of one owner, unique by `context`.
///
/// Encoded as a single JSON array; order is insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftCollection {
    drafts: Vec<Draft>,
}

impl DraftCollection {
    pub fn decode(bytes: &[u8]) -> Result<Self, ServiceError> {
        let drafts: Vec<Draft> = serde_json::from_slice(bytes)?;
        Ok(Self { drafts })
    }

    pub fn encode(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(serde_json::to_vec(&self.drafts)?)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn as_slice(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn into_vec(self) -> Vec<Draft> {
        self.drafts
    }

    pub fn position(&self, context: &str) -> Option<usize> {
        self.drafts.iter().position(|d| d.context == context)
    }

    pub fn get(&self, context: &str) -> Option<&Draft> {
        self.drafts.iter().find(|d| d.context == context)
    }

    /// Append `draft` unless its context is already taken.
    pub fn insert(&mut self, draft: Draft) -> Result<(), ServiceError> {
        if self.position(&draft.context).is_some() {
            return Err(ServiceError::duplicate("draft"));
        }
        self.drafts.push(draft);
        Ok(())
    }

    /// Overwrite `type` and `data` of the draft at `context`; everything else is kept.
    pub fn update(&mut self, context: &str, kind: String, data: DraftData) -> Result<&Draft, ServiceError> {
        let pos = self.position(context).ok_or_else(|| ServiceError::not_found("draft"))?;
        let existing = &mut self.drafts[pos];
        existing.kind = kind;
        existing.data = data;
        Ok(&*existing)
    }

    /// Remove the draft at `context`, keeping the order of the rest.
    pub fn remove(&mut self, context: &str) -> Result<Draft, ServiceError> {
        let pos = self.position(context).ok_or_else(|| ServiceError::not_found("draft"))?;
        Ok(self.drafts.remove(pos))
    }
}

impl From<Vec<Draft>> for DraftCollection {
    fn from(drafts: Vec<Draft>) -> Self {
        Self { drafts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(context: &str, x: i64) -> Draft {
        Draft {
            id: 42,
            kind: "note".into(),
            context: context.into(),
            data: json!({"x": x}).as_object().cloned().unwrap(),
            created_at: "2024-01-01T00:00:00Z".into(),
            iri: format!("/front/drafts/{context}"),
        }
    }

    fn contexts(c: &DraftCollection) -> Vec<&str> {
        c.as_slice().iter().map(|d| d.context.as_str()).collect()
    }

    #[test]
    fn owner_key_is_decimal_id() {
        assert_eq!(owner_key(42), "42");
        assert_eq!(owner_key(-7), "-7");
    }

    #[test]
    fn insert_appends_and_rejects_duplicate_context() {
        let mut c = DraftCollection::default();
        c.insert(draft("a", 1)).unwrap();
        c.insert(draft("b", 2)).unwrap();
        let before = c.clone();

        let err = c.insert(draft("a", 99)).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateValue(_)));
        assert_eq!(c, before);
        assert_eq!(contexts(&c), ["a", "b"]);
    }

    #[test]
    fn update_touches_only_type_and_data() {
        let mut c = DraftCollection::from(vec![draft("a", 1), draft("b", 2)]);
        let before = c.get("b").cloned().unwrap();

        let data = json!({"x": 5, "nested": {"k": [1, 2]}}).as_object().cloned().unwrap();
        let updated = c.update("b", "todo".into(), data.clone()).unwrap().clone();

        assert_eq!(updated.kind, "todo");
        assert_eq!(updated.data, data);
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.context, before.context);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(updated.iri, before.iri);
        assert_eq!(c.get("a"), Some(&draft("a", 1)));
    }

    #[test]
    fn update_missing_context_is_not_found() {
        let mut c = DraftCollection::from(vec![draft("a", 1)]);
        let before = c.clone();
        let err = c.update("zz", "t".into(), DraftData::new()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(c, before);
    }

    #[test]
    fn remove_excises_one_and_keeps_order() {
        let mut c = DraftCollection::from(vec![draft("a", 1), draft("b", 2), draft("c", 3), draft("d", 4)]);
        let removed = c.remove("b").unwrap();
        assert_eq!(removed.context, "b");
        assert_eq!(contexts(&c), ["a", "c", "d"]);

        let before = c.clone();
        assert!(matches!(c.remove("b"), Err(ServiceError::NotFound(_))));
        assert_eq!(c, before);

        for ctx in ["a", "c", "d"] {
            c.remove(ctx).unwrap();
        }
        assert!(c.is_empty());
        assert_eq!(c.encode().unwrap(), b"[]");
    }

    #[test]
    fn codec_keeps_nested_data_and_key_order() {
        let raw = br#"[{"id":42,"type":"note","context":"a","data":{"z":1,"a":{"deep":[1,{"b":null}],"f":1.5},"s":"t"},"createdAt":"2024-01-01T00:00:00Z","iri":"/front/drafts/a"}]"#;
        let c = DraftCollection::decode(raw).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.encode().unwrap(), raw.to_vec());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(DraftCollection::decode(b"{\"not\":\"a list\"}"), Err(ServiceError::Codec(_))));
    }
}
