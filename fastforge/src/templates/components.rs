//! Single-file component templates
//!
//! Rendered with a component context: `name`, `plural_name`, `class_name`,
//! `display_name_literal`, `title_name`. The raw `display_name` never goes
//! inside Python string literals; f-strings use `title_name` so braces in a
//! user-supplied name cannot become expressions.

/// SQLModel table model
pub const MODEL: &str = r#""""{{ title_name }} model."""
from datetime import datetime
from typing import Optional

from sqlmodel import Field, SQLModel


class {{ class_name }}Base(SQLModel):
    """Fields shared by every {{ display_name_literal }} representation."""

    name: str = Field(index=True, description="{{ display_name_literal }} name")
    description: Optional[str] = Field(default=None, description="Description")


class {{ class_name }}({{ class_name }}Base, table=True):
    """{{ display_name_literal }} database table."""

    __tablename__ = "{{ plural_name }}"

    id: Optional[int] = Field(default=None, primary_key=True)
    created_at: datetime = Field(default_factory=datetime.now, description="Creation time")
    updated_at: datetime = Field(default_factory=datetime.now, description="Last update time")
"#;

/// Pydantic request/response schemas
pub const SCHEMA: &str = r#""""{{ title_name }} schemas."""
from datetime import datetime
from typing import Optional

from pydantic import BaseModel, ConfigDict

from app.models.{{ name }} import {{ class_name }}Base


class {{ class_name }}Create({{ class_name }}Base):
    """Payload for creating a {{ display_name_literal }}."""


class {{ class_name }}Update(BaseModel):
    """Payload for updating a {{ display_name_literal }}; every field optional."""

    name: Optional[str] = None
    description: Optional[str] = None


class {{ class_name }}Read({{ class_name }}Base):
    """{{ display_name_literal }} as returned by the API."""

    model_config = ConfigDict(from_attributes=True)

    id: int
    created_at: datetime
    updated_at: datetime
"#;

/// CRUD endpoint router
pub const API: &str = r#""""{{ title_name }} endpoints."""
from typing import List

from fastapi import APIRouter, Depends, HTTPException, status
from sqlmodel import Session, select

from app.db.session import get_session
from app.models.{{ name }} import {{ class_name }}
from app.schemas.{{ name }} import {{ class_name }}Create, {{ class_name }}Read, {{ class_name }}Update

router = APIRouter()


def _get_or_404(session: Session, {{ name }}_id: int) -> {{ class_name }}:
    {{ name }} = session.get({{ class_name }}, {{ name }}_id)
    if not {{ name }}:
        raise HTTPException(
            status_code=status.HTTP_404_NOT_FOUND,
            detail=f"{{ title_name }} {{{ name }}_id} not found",
        )
    return {{ name }}


@router.get("/", response_model=List[{{ class_name }}Read])
def list_{{ plural_name }}(
    skip: int = 0,
    limit: int = 100,
    session: Session = Depends(get_session),
):
    """List {{ plural_name }}."""
    return session.exec(select({{ class_name }}).offset(skip).limit(limit)).all()


@router.get("/{{{ name }}_id}", response_model={{ class_name }}Read)
def get_{{ name }}({{ name }}_id: int, session: Session = Depends(get_session)):
    """Fetch one {{ display_name_literal }} by id."""
    return _get_or_404(session, {{ name }}_id)


@router.post("/", response_model={{ class_name }}Read, status_code=status.HTTP_201_CREATED)
def create_{{ name }}(payload: {{ class_name }}Create, session: Session = Depends(get_session)):
    """Create a {{ display_name_literal }}."""
    {{ name }} = {{ class_name }}.model_validate(payload)
    session.add({{ name }})
    session.commit()
    session.refresh({{ name }})
    return {{ name }}


@router.put("/{{{ name }}_id}", response_model={{ class_name }}Read)
def update_{{ name }}(
    {{ name }}_id: int,
    payload: {{ class_name }}Update,
    session: Session = Depends(get_session),
):
    """Update a {{ display_name_literal }}."""
    {{ name }} = _get_or_404(session, {{ name }}_id)
    for key, value in payload.model_dump(exclude_unset=True).items():
        setattr({{ name }}, key, value)
    session.add({{ name }})
    session.commit()
    session.refresh({{ name }})
    return {{ name }}


@router.delete("/{{{ name }}_id}", status_code=status.HTTP_204_NO_CONTENT)
def delete_{{ name }}({{ name }}_id: int, session: Session = Depends(get_session)):
    """Delete a {{ display_name_literal }}."""
    session.delete(_get_or_404(session, {{ name }}_id))
    session.commit()
"#;

/// Service class wrapping CRUD operations
pub const SERVICE: &str = r#""""{{ title_name }} service."""
from typing import List, Optional

from fastapi import Depends, HTTPException, status
from sqlmodel import Session, select

from app.db.session import get_session
from app.models.{{ name }} import {{ class_name }}
from app.schemas.{{ name }} import {{ class_name }}Create, {{ class_name }}Update


class {{ class_name }}Service:
    """Business operations on {{ plural_name }}."""

    def __init__(self, session: Session = Depends(get_session)):
        self.session = session

    def get_all(self, skip: int = 0, limit: int = 100) -> List[{{ class_name }}]:
        return list(self.session.exec(select({{ class_name }}).offset(skip).limit(limit)).all())

    def get_by_id(self, {{ name }}_id: int) -> Optional[{{ class_name }}]:
        return self.session.get({{ class_name }}, {{ name }}_id)

    def create(self, payload: {{ class_name }}Create) -> {{ class_name }}:
        {{ name }} = {{ class_name }}.model_validate(payload)
        self.session.add({{ name }})
        self.session.commit()
        self.session.refresh({{ name }})
        return {{ name }}

    def update(self, {{ name }}_id: int, payload: {{ class_name }}Update) -> {{ class_name }}:
        {{ name }} = self._require({{ name }}_id)
        for key, value in payload.model_dump(exclude_unset=True).items():
            setattr({{ name }}, key, value)
        self.session.add({{ name }})
        self.session.commit()
        self.session.refresh({{ name }})
        return {{ name }}

    def delete(self, {{ name }}_id: int) -> None:
        self.session.delete(self._require({{ name }}_id))
        self.session.commit()

    def _require(self, {{ name }}_id: int) -> {{ class_name }}:
        {{ name }} = self.get_by_id({{ name }}_id)
        if not {{ name }}:
            raise HTTPException(
                status_code=status.HTTP_404_NOT_FOUND,
                detail=f"{{ title_name }} {{{ name }}_id} not found",
            )
        return {{ name }}
"#;
