//! Equipment purchases module.

use crate::model::EquipmentItem;
use crate::service::ServiceResult;
use crate::store::{RecordId, RecordStore};
use chrono::NaiveDate;

/// Input for a new equipment purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub purchased_on: NaiveDate,
    pub price: f64,
    pub supplier: String,
}

/// Everything the equipment screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentView {
    pub items: Vec<EquipmentItem>,
    pub total_invested: f64,
    pub most_expensive: Option<EquipmentItem>,
    pub most_recent: Option<EquipmentItem>,
}

pub struct EquipmentService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> EquipmentService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    pub fn add_item(&mut self, request: NewEquipment) -> ServiceResult<EquipmentItem> {
        let mut item = EquipmentItem {
            id: None,
            purchased_on: request.purchased_on,
            price: request.price,
            supplier: request.supplier,
        };
        item.validate()?;
        self.store.put(&mut item)?;
        Ok(item)
    }

    pub fn delete_item(&mut self, id: RecordId) -> ServiceResult<()> {
        self.store.delete::<EquipmentItem>(id)?;
        Ok(())
    }

    pub fn items(&self) -> ServiceResult<Vec<EquipmentItem>> {
        let mut items: Vec<EquipmentItem> = self.store.get_all()?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    pub fn view(&self) -> ServiceResult<EquipmentView> {
        let items = self.items()?;
        let total_invested = items.iter().map(|item| item.price).sum();

        let most_expensive = items
            .iter()
            .cloned()
            .reduce(|max, item| if item.price > max.price { item } else { max });
        let most_recent = items.iter().cloned().reduce(|latest, item| {
            if item.purchased_on > latest.purchased_on {
                item
            } else {
                latest
            }
        });

        Ok(EquipmentView {
            items,
            total_invested,
            most_expensive,
            most_recent,
        })
    }
}
